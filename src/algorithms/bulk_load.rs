use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;
use std::cmp::Ordering;
use tracing::debug;

/// 批量加载 - 自底向上构建平衡树
impl<T> RTree<T> {
    /// 用给定条目重建整棵树，原有内容被替换
    ///
    /// 条目按X轴中心点排序后分组打包为叶子节点，
    /// 再逐层用同样的排序和分组规则打包出父节点，直到只剩一个根节点。
    /// 产出的树所有叶子在同一层；每层最后一组的填充度可能低于最小条目数，
    /// 批量加载后不执行收缩
    pub fn bulk_load(&mut self, items: Vec<(Rectangle, T)>) {
        if items.is_empty() {
            *self.root_mut() = None;
            return;
        }

        let max_entries = self.max_entries_internal();
        debug!(count = items.len(), "bulk loading tree");

        // 叶子层：按X中心点排序后切分
        let mut items = items;
        items.sort_by(|a, b| {
            a.0.center()[0]
                .partial_cmp(&b.0.center()[0])
                .unwrap_or(Ordering::Equal)
        });

        let group_size = pack_group_size(items.len(), max_entries);
        let mut level_nodes: Vec<Node<T>> = Vec::new();
        let mut remaining = items;
        while !remaining.is_empty() {
            let tail = remaining.split_off(group_size.min(remaining.len()));
            let mut leaf = Node::new_leaf_node();
            for (mbr, data) in remaining {
                leaf.add_entry(Entry::Data { mbr, data });
            }
            level_nodes.push(leaf);
            remaining = tail;
        }

        // 上层：重复排序和分组，直到只剩一个节点
        let mut level = 0;
        while level_nodes.len() > 1 {
            level += 1;
            level_nodes.sort_by(|a, b| {
                a.mbr.center()[0]
                    .partial_cmp(&b.mbr.center()[0])
                    .unwrap_or(Ordering::Equal)
            });

            let group_size = pack_group_size(level_nodes.len(), max_entries);
            let mut parents: Vec<Node<T>> = Vec::new();
            let mut remaining = level_nodes;
            while !remaining.is_empty() {
                let tail = remaining.split_off(group_size.min(remaining.len()));
                let mut parent = Node::new_index_node(level);
                for child in remaining {
                    parent.add_entry(Entry::Node {
                        mbr: child.mbr,
                        node: Box::new(child),
                    });
                }
                parents.push(parent);
                remaining = tail;
            }
            level_nodes = parents;
        }

        if let Some(root) = level_nodes.pop() {
            *self.root_mut() = Some(Box::new(root));
        }
    }
}

/// 每组条目数：⌈n / ⌈n / max_entries⌉⌉
///
/// 在不超过节点容量的前提下让各组大小尽量均衡
fn pack_group_size(n: usize, max_entries: usize) -> usize {
    let group_count = n.div_ceil(max_entries);
    n.div_ceil(group_count)
}
