//! 结构不变量的随机化测试
//!
//! 对任意插入/删除/批量加载序列产生的树，验证：
//! - 每个节点的MBR等于其条目MBR的并集
//! - 所有叶子节点在同一层，层级自叶子0逐层递增
//! - 叶子节点只持有数据条目，索引节点只持有节点条目
//! - 每个节点条目数不超过容量，非根节点非空
//! - 全域搜索恰好返回尚未删除的全部负载

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtree2d::{Entry, Node, RTree, Rectangle, SplitAlgorithm};

/// 递归检查一个节点及其子树，返回该子树下叶子的深度
fn check_node<T>(node: &Node<T>, is_root: bool, max_entries: usize, depth: usize) -> usize {
    assert!(
        node.entries.len() <= max_entries,
        "node at level {} holds {} entries, capacity is {}",
        node.level,
        node.entries.len(),
        max_entries
    );
    if !is_root {
        assert!(
            !node.entries.is_empty(),
            "non-root node at level {} is empty",
            node.level
        );
    }

    if !node.entries.is_empty() {
        let mut expected = *node.entries[0].mbr();
        for entry in &node.entries[1..] {
            expected = expected.union(entry.mbr());
        }
        assert_eq!(
            node.mbr, expected,
            "node MBR does not equal the union of its entries"
        );
    }

    if node.is_leaf_node() {
        assert_eq!(node.level, 0, "leaf node must sit at level 0");
        for entry in &node.entries {
            assert!(entry.is_data(), "leaf node holds a non-data entry");
        }
        return depth;
    }

    let mut leaf_depth = None;
    for entry in &node.entries {
        match entry {
            Entry::Data { .. } => panic!("index node holds a data entry"),
            Entry::Node { mbr, node: child } => {
                assert_eq!(
                    mbr, &child.mbr,
                    "entry MBR is out of sync with its child node"
                );
                assert_eq!(
                    child.level,
                    node.level - 1,
                    "child level must be exactly one below its parent"
                );
                let d = check_node(child, false, max_entries, depth + 1);
                match leaf_depth {
                    None => leaf_depth = Some(d),
                    Some(previous) => {
                        assert_eq!(previous, d, "leaves found at different depths")
                    }
                }
            }
        }
    }
    leaf_depth.unwrap_or(depth)
}

fn check_invariants<T: Clone + PartialEq + Ord + std::fmt::Debug>(
    tree: &RTree<T>,
    expected: &[T],
) {
    if let Some(root) = tree.root() {
        check_node(root, true, tree.max_entries(), 0);
    }

    let universe = Rectangle::new(-1e6, -1e6, 1e6, 1e6).unwrap();
    let mut found = tree.search(&universe);
    found.sort();
    let mut expected = expected.to_vec();
    expected.sort();
    assert_eq!(found, expected, "universe search does not match live payloads");

    assert_eq!(tree.len(), expected.len());
}

fn random_unit_rects(count: usize, seed: u64) -> Vec<(Rectangle, i32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count as i32)
        .map(|i| {
            let x = rng.gen_range(0.0..99.0);
            let y = rng.gen_range(0.0..99.0);
            (Rectangle::new(x, y, x + 1.0, y + 1.0).unwrap(), i)
        })
        .collect()
}

#[test]
fn invariants_hold_with_min_fanout() {
    // M=2 的极端情形：50个随机单位矩形，每次插入后检查全部不变量，
    // 再隔一个删一个，每次删除后同样检查
    let rects = random_unit_rects(50, 42);
    let mut tree = RTree::new(2, SplitAlgorithm::Quadratic).unwrap();
    let mut live: Vec<i32> = Vec::new();

    for (rect, id) in &rects {
        tree.insert(*rect, *id);
        live.push(*id);
        check_invariants(&tree, &live);
    }

    for (rect, id) in rects.iter().step_by(2) {
        assert!(tree.delete(rect, id), "entry {} should be deletable", id);
        live.retain(|v| v != id);
        check_invariants(&tree, &live);
    }
}

#[test]
fn invariants_hold_for_every_split_algorithm() {
    for algorithm in [
        SplitAlgorithm::Quadratic,
        SplitAlgorithm::Linear,
        SplitAlgorithm::RStar,
    ] {
        let rects = random_unit_rects(120, 7);
        let mut tree = RTree::new(5, algorithm).unwrap();
        let mut live: Vec<i32> = Vec::new();

        for (rect, id) in &rects {
            tree.insert(*rect, *id);
            live.push(*id);
        }
        check_invariants(&tree, &live);

        // 删掉三分之二，途中多次检查
        for (i, (rect, id)) in rects.iter().enumerate() {
            if i % 3 == 0 {
                continue;
            }
            assert!(tree.delete(rect, id));
            live.retain(|v| v != id);
            if i % 10 == 0 {
                check_invariants(&tree, &live);
            }
        }
        check_invariants(&tree, &live);
    }
}

#[test]
fn invariants_hold_after_bulk_load() {
    let rects = random_unit_rects(200, 99);
    let mut tree = RTree::new(6, SplitAlgorithm::Quadratic).unwrap();
    let live: Vec<i32> = rects.iter().map(|(_, id)| *id).collect();

    tree.bulk_load(rects.clone());
    check_invariants(&tree, &live);

    // 批量加载后树保持平衡：高度与统计一致
    let stats = tree.stats();
    assert_eq!(stats.height, tree.depth());

    // 批量加载的结果与逐个插入可见内容一致
    let mut incremental = RTree::new(6, SplitAlgorithm::Quadratic).unwrap();
    for (rect, id) in rects {
        incremental.insert(rect, id);
    }
    let universe = Rectangle::new(-1e6, -1e6, 1e6, 1e6).unwrap();
    let mut a = tree.search(&universe);
    let mut b = incremental.search(&universe);
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[test]
fn mixed_operations_keep_tree_consistent() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut tree = RTree::new(4, SplitAlgorithm::Linear).unwrap();
    let mut live: Vec<(Rectangle, i32)> = Vec::new();
    let mut next_id = 0;

    for round in 0..300 {
        let delete_allowed = !live.is_empty();
        if delete_allowed && rng.gen_bool(0.4) {
            let index = rng.gen_range(0..live.len());
            let (rect, id) = live.swap_remove(index);
            assert!(tree.delete(&rect, &id), "live entry {} must be deletable", id);
        } else {
            let x = rng.gen_range(0.0..500.0);
            let y = rng.gen_range(0.0..500.0);
            let w = rng.gen_range(0.0..10.0);
            let h = rng.gen_range(0.0..10.0);
            let rect = Rectangle::new(x, y, x + w, y + h).unwrap();
            tree.insert(rect, next_id);
            live.push((rect, next_id));
            next_id += 1;
        }

        if round % 25 == 0 {
            let ids: Vec<i32> = live.iter().map(|(_, id)| *id).collect();
            check_invariants(&tree, &ids);
        }
    }

    let ids: Vec<i32> = live.iter().map(|(_, id)| *id).collect();
    check_invariants(&tree, &ids);
}
