use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;
use tracing::{debug, warn};

/// R-tree删除算法
impl<T: PartialEq> RTree<T> {
    /// 删除指定的数据条目
    ///
    /// 条目按矩形相等且负载相等匹配，每次调用只删除一个匹配条目；
    /// 没有找到匹配条目时返回false，树保持不变
    pub fn delete(&mut self, rect: &Rectangle, data: &T) -> bool {
        // D1: 找到包含目标条目的叶子节点
        let Some(leaf_path) = self.find_leaf_path(rect, data) else {
            return false;
        };

        // D2: 从叶子节点删除条目
        {
            let leaf_node = match self.get_last_node_mut(&leaf_path) {
                Some(node) => node,
                None => {
                    warn!("leaf path resolved to a missing node during deletion");
                    return false;
                }
            };

            let position = leaf_node.entries.iter().position(|entry| {
                matches!(entry, Entry::Data { mbr, data: entry_data }
                    if mbr == rect && entry_data == data)
            });
            let Some(position) = position else {
                return false;
            };

            leaf_node.entries.remove(position);
            leaf_node.update_mbr();
        }

        // D3: 自底向上收缩下溢节点并重新插入孤儿条目
        self.condense_tree(leaf_path);

        // D4: 如果根节点只剩一个子节点且为索引节点，则缩短树
        self.shorten_tree();

        true
    }

    /// 查找包含指定数据条目的叶子节点路径
    ///
    /// 返回从根节点到首个包含目标条目的叶子节点的路径
    pub(crate) fn find_leaf_path(&self, rect: &Rectangle, data: &T) -> Option<Vec<usize>> {
        let root = self.root_ref().as_deref()?;

        let mut path = Vec::new();
        if Self::find_leaf_recursive(root, rect, data, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    /// 递归查找包含指定数据条目的叶子节点
    ///
    /// 在MBR与目标矩形相交的每棵子树中继续搜索
    fn find_leaf_recursive(
        node: &Node<T>,
        rect: &Rectangle,
        data: &T,
        path: &mut Vec<usize>,
    ) -> bool {
        if node.is_leaf_node() {
            return node.entries.iter().any(|entry| {
                matches!(entry, Entry::Data { mbr, data: entry_data }
                    if mbr == rect && entry_data == data)
            });
        }

        for (i, entry) in node.entries.iter().enumerate() {
            if let Entry::Node { mbr, node: child } = entry {
                if mbr.intersects(rect) {
                    path.push(i);
                    if Self::find_leaf_recursive(child, rect, data, path) {
                        return true;
                    }
                    path.pop();
                }
            }
        }
        false
    }

    /// 收缩树 - 删除后的自底向上维护
    ///
    /// 从叶子节点向上逐层检查：条目数少于最小条目数的节点被整体摘除，
    /// 其下所有数据条目收集为孤儿；其余节点只更新MBR。
    /// 向上遍历结束后，孤儿条目通过完整的插入流程回到树中
    fn condense_tree(&mut self, mut path: Vec<usize>) {
        let min_entries = self.min_entries_internal();
        let mut orphans: Vec<(Rectangle, T)> = Vec::new();

        while let Some(&child_index) = path.last() {
            let (underfull, child_mbr) = {
                let node = match self.get_last_node_mut(&path) {
                    Some(node) => node,
                    None => {
                        warn!("condense path resolved to a missing node");
                        return;
                    }
                };
                node.update_mbr();
                (node.entries.len() < min_entries, node.mbr)
            };

            path.pop();

            let parent = if path.is_empty() {
                self.root_mut().as_deref_mut()
            } else {
                self.get_last_node_mut(&path)
            };
            let Some(parent) = parent else {
                warn!("condense path lost its parent node");
                return;
            };

            if underfull {
                if child_index < parent.entries.len() {
                    let detached = parent.entries.remove(child_index);
                    collect_data_entries(detached, &mut orphans);
                }
            } else if let Some(Entry::Node { mbr, .. }) = parent.entries.get_mut(child_index) {
                *mbr = child_mbr;
            }
        }

        if let Some(root) = self.root_mut().as_mut() {
            root.update_mbr();
        }

        if !orphans.is_empty() {
            debug!(count = orphans.len(), "reinserting orphaned entries");
        }
        for (mbr, data) in orphans {
            self.insert(mbr, data);
        }
    }

    /// 缩短树 - 根节点是只有一个子节点的索引节点时，将该子节点提升为新根
    ///
    /// 叶子根节点不会被提升；根节点不再持有任何条目时整棵树被清空
    pub(crate) fn shorten_tree(&mut self) {
        loop {
            let should_shorten = self
                .root_ref()
                .as_ref()
                .is_some_and(|root| root.is_index_node() && root.entries.len() == 1);
            if !should_shorten {
                break;
            }

            let Some(old_root) = self.root_mut().take() else {
                break;
            };
            match old_root.entries.into_iter().next() {
                Some(Entry::Node { node, .. }) => *self.root_mut() = Some(node),
                _ => break, // 索引节点不应持有数据条目
            }
        }

        let root_empty = self
            .root_ref()
            .as_ref()
            .is_some_and(|root| root.entries.is_empty());
        if root_empty {
            *self.root_mut() = None;
        }
    }
}

/// 递归收集一个被摘除子树下的所有数据条目
fn collect_data_entries<T>(entry: Entry<T>, orphans: &mut Vec<(Rectangle, T)>) {
    match entry {
        Entry::Data { mbr, data } => orphans.push((mbr, data)),
        Entry::Node { node, .. } => {
            for child_entry in node.entries {
                collect_data_entries(child_entry, orphans);
            }
        }
    }
}
