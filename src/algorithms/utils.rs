use crate::node::{Entry, Node};
use crate::rtree::RTree;
use tracing::warn;

/// R-tree共用工具：路径导航与自底向上的MBR调整
impl<T> RTree<T> {
    /// 获取路径中最后一个节点的可变引用
    ///
    /// 根据给定的路径从根节点开始遍历，返回路径末端节点的可变引用。
    /// 空路径返回根节点本身
    pub(crate) fn get_last_node_mut(&mut self, path: &[usize]) -> Option<&mut Node<T>> {
        let mut current = self.root_mut().as_mut()?;

        for &index in path {
            if let Some(Entry::Node { node, .. }) = current.entries.get_mut(index) {
                current = node;
            } else {
                return None;
            }
        }

        Some(current)
    }

    /// 向上调整树 - 从路径末端节点逐层更新MBR
    ///
    /// 途中遇到空的索引节点时将其从父节点中移除；
    /// 如果移除导致根节点变空，则整棵树被清空
    pub(crate) fn adjust_tree_upward(&mut self, mut path: Vec<usize>) {
        while let Some(&child_index) = path.last() {
            let (remove_node, child_mbr) = {
                let node = match self.get_last_node_mut(&path) {
                    Some(node) => node,
                    None => {
                        warn!("adjust path resolved to a missing node, aborting MBR update");
                        return;
                    }
                };
                node.update_mbr();
                (node.is_index_node() && node.entries.is_empty(), node.mbr)
            };

            path.pop();

            let parent = if path.is_empty() {
                self.root_mut().as_deref_mut()
            } else {
                self.get_last_node_mut(&path)
            };
            let Some(parent) = parent else {
                warn!("adjust path lost its parent node, aborting MBR update");
                return;
            };

            if remove_node {
                if child_index < parent.entries.len() {
                    parent.entries.remove(child_index);
                }
            } else if let Some(Entry::Node { mbr, .. }) = parent.entries.get_mut(child_index) {
                *mbr = child_mbr;
            }
        }

        // 最后刷新根节点；根节点自己变空时清空整棵树
        let root_emptied = self
            .root_ref()
            .as_ref()
            .is_some_and(|root| root.is_index_node() && root.entries.is_empty());
        if root_emptied {
            *self.root_mut() = None;
        } else if let Some(root) = self.root_mut().as_mut() {
            root.update_mbr();
        }
    }
}
