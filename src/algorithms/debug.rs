use crate::node::{Entry, Node};
use crate::rtree::RTree;
use std::fmt::Debug;

/// R-tree调试功能实现
impl<T: Debug> RTree<T> {
    /// 打印完整的树结构用于调试
    ///
    /// 递归遍历整个树结构，打印每个节点的类型、层级、MBR边界和条目，
    /// 用于调试和可视化，输出格式不构成稳定契约
    #[allow(dead_code)]
    pub fn print_tree_structure_debug(&self) {
        fn print_node_recursive<T: Debug>(node: &Node<T>, depth: usize, path: String) {
            let indent = "  ".repeat(depth);
            println!(
                "{}Node{} (level={}, type={:?}, mbr=[{:.2},{:.2},{:.2},{:.2}], {} entries):",
                indent,
                path,
                node.level,
                node.node_type,
                node.mbr.min[0],
                node.mbr.min[1],
                node.mbr.max[0],
                node.mbr.max[1],
                node.entries.len()
            );

            if node.entries.is_empty() {
                println!("{}  ❌ EMPTY NODE!", indent);
            }

            for (i, entry) in node.entries.iter().enumerate() {
                match entry {
                    Entry::Data { mbr, data } => {
                        println!(
                            "{}  [{}] Data: {:?} at [{:.2},{:.2},{:.2},{:.2}]",
                            indent, i, data, mbr.min[0], mbr.min[1], mbr.max[0], mbr.max[1]
                        );
                    }
                    Entry::Node { mbr, node: child_node } => {
                        println!(
                            "{}  [{}] Node: mbr=[{:.2},{:.2},{:.2},{:.2}] -> child:",
                            indent, i, mbr.min[0], mbr.min[1], mbr.max[0], mbr.max[1]
                        );

                        let child_path = if path.is_empty() {
                            format!("[{}]", i)
                        } else {
                            format!("{}[{}]", path, i)
                        };

                        print_node_recursive(child_node, depth + 1, child_path);
                    }
                }
            }
        }

        println!("=== R-tree Structure Debug ===");
        match self.root() {
            Some(root) => print_node_recursive(root, 0, String::new()),
            None => println!("Empty tree (no root)"),
        }
        println!("=== End Debug ===");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rectangle;
    use crate::rtree::SplitAlgorithm;

    #[test]
    fn test_debug_functions() {
        let mut rtree = RTree::new(4, SplitAlgorithm::Quadratic).unwrap();

        // 空树的调试输出不应崩溃
        rtree.print_tree_structure_debug();

        rtree.insert(Rectangle::new(0.0, 0.0, 1.0, 1.0).unwrap(), "1".to_string());
        rtree.insert(Rectangle::new(2.0, 2.0, 3.0, 3.0).unwrap(), "2".to_string());

        rtree.print_tree_structure_debug();
        assert!(!rtree.is_empty());
    }
}
