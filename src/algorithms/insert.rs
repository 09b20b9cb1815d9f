use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 插入操作相关算法
impl<T> RTree<T> {
    /// 插入新的数据条目 - 遵循论文Algorithm Insert
    ///
    /// 矩形在构造时已经过校验，负载由类型系统保证存在，
    /// 因此插入本身不会失败
    pub fn insert(&mut self, rect: Rectangle, data: T) {
        // I1: 如果根节点不存在，创建根节点
        if self.root_ref().is_none() {
            let mut root = Node::new_leaf_node();
            root.add_entry(Entry::Data { mbr: rect, data });
            *self.root_mut() = Some(Box::new(root));
            return;
        }

        // I2: 选择叶子节点
        let leaf_path = self.choose_leaf_path(&rect);

        // I3: 添加记录到叶子节点
        let max_entries = self.max_entries_internal();
        let leaf_node = match self.get_last_node_mut(&leaf_path) {
            Some(node) => node,
            None => {
                // choose_leaf_path 只会产生有效路径，走到这里说明树结构已损坏
                panic!("Failed to get leaf node during insertion");
            }
        };
        leaf_node.add_entry(Entry::Data { mbr: rect, data });

        // I4: 检查是否需要分裂并调整树
        if leaf_node.entries.len() > max_entries {
            self.handle_overflow(leaf_path);
        } else {
            self.adjust_tree_upward(leaf_path);
        }
    }

    /// 选择叶子节点路径 - 遵循论文ChooseLeaf算法
    fn choose_leaf_path(&self, rect: &Rectangle) -> Vec<usize> {
        let mut path = Vec::new();
        let Some(mut current) = self.root_ref().as_deref() else {
            return path;
        };

        // CL2: 叶子检查，CL4: 逐层下降
        while !current.is_leaf_node() {
            // CL3: 选择子树 - 选择扩大面积最小的条目
            let best_index = Self::choose_subtree(&current.entries, rect);
            path.push(best_index);

            match current.entries.get(best_index) {
                Some(Entry::Node { node, .. }) => current = node,
                _ => break,
            }
        }

        path
    }

    /// 选择子树 - 计算扩大面积最小的条目
    ///
    /// 扩大面积相同时保留先遇到的条目
    fn choose_subtree(entries: &[Entry<T>], rect: &Rectangle) -> usize {
        let mut best_index = 0;
        let mut min_enlargement = f64::INFINITY;

        for (i, entry) in entries.iter().enumerate() {
            let enlargement = entry.mbr().enlargement(rect);
            if enlargement < min_enlargement {
                min_enlargement = enlargement;
                best_index = i;
            }
        }

        best_index
    }
}
