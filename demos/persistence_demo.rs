use rtree2d::{RTree, Rectangle, SplitAlgorithm};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== R-tree持久化功能演示 ===\n");

    // 1. 创建并填充R-tree
    println!("1. 创建R-tree并插入数据...");
    let mut rtree = RTree::new(4, SplitAlgorithm::Quadratic)?;

    let data = vec![
        (Rectangle::new(0.0, 0.0, 1.0, 1.0)?, 1),
        (Rectangle::new(2.0, 2.0, 3.0, 3.0)?, 2),
        (Rectangle::new(5.0, 5.0, 6.0, 6.0)?, 3),
        (Rectangle::new(1.5, 1.5, 2.5, 2.5)?, 4),
        (Rectangle::new(3.5, 3.5, 4.5, 4.5)?, 5),
    ];

    for (rect, id) in data {
        rtree.insert(rect, id);
    }

    println!("   插入了 {} 个数据项", rtree.len());

    // 2. 导出为JSON格式（调试用）
    println!("\n2. 导出为JSON格式...");
    rtree.dump_to_file("example_data.json")?;

    let json_size = fs::metadata("example_data.json")?.len();
    println!("   JSON文件大小: {} bytes", json_size);

    // 3. 导出为二进制格式（生产用）
    println!("\n3. 导出为二进制格式...");
    rtree.dump_to_file("example_data.bin")?;

    let bin_size = fs::metadata("example_data.bin")?.len();
    println!("   文件大小比较: JSON {} bytes vs Binary {} bytes", json_size, bin_size);

    // 4. 从文件加载并验证一致性
    println!("\n4. 从文件加载R-tree...");
    let from_json: RTree<i32> =
        RTree::load_from_file("example_data.json", 4, SplitAlgorithm::Quadratic)?;
    let from_binary: RTree<i32> =
        RTree::load_from_file("example_data.bin", 4, SplitAlgorithm::Quadratic)?;
    println!(
        "   加载成功，数据项数量: JSON {} / Binary {}",
        from_json.len(),
        from_binary.len()
    );

    let query = Rectangle::new(0.5, 0.5, 2.5, 2.5)?;
    let mut original_results = rtree.search(&query);
    let mut json_results = from_json.search(&query);
    let mut binary_results = from_binary.search(&query);
    original_results.sort_unstable();
    json_results.sort_unstable();
    binary_results.sort_unstable();

    assert_eq!(original_results, json_results);
    assert_eq!(original_results, binary_results);
    println!("   搜索结果一致: {:?}", original_results);

    // 5. 查看树的统计信息
    let stats = rtree.stats();
    println!("\n5. 树的统计信息:");
    println!("   节点数: {}", stats.node_count);
    println!("   叶子数: {}", stats.leaf_count);
    println!("   树高: {}", stats.height);
    println!("   平均填充度: {:.2}", stats.average_node_fill);

    // 清理演示文件
    fs::remove_file("example_data.json")?;
    fs::remove_file("example_data.bin")?;

    println!("\n=== 演示完成 ===");
    Ok(())
}
