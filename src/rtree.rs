use crate::error::RTreeError;
use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};

/// 节点分裂算法
///
/// 三种算法都将溢出节点的条目划分为两个非空分组，
/// 在相同输入下产生确定性的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAlgorithm {
    /// 二次分裂：遍历所有条目对选择种子，按扩大成本差异逐个分配
    Quadratic,
    /// 线性分裂：按轴向分离度选择种子，按最小扩大成本分配
    Linear,
    /// R*风格分裂：按周长和选择轴，按最小重叠面积选择分裂点
    RStar,
}

/// 树的统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    /// 目录节点总数（叶子节点 + 索引节点）
    pub node_count: usize,
    /// 叶子节点数
    pub leaf_count: usize,
    /// 树高：空树或单叶子树为1
    pub height: usize,
    /// 平均填充度：所有节点的条目总数 / 节点总数
    pub average_node_fill: f64,
}

/// R-tree主结构
///
/// 空树以无根节点表示，对外等价于一个不含条目、MBR退化为(0,0,0,0)的叶子根节点
#[derive(Debug, Clone)]
pub struct RTree<T> {
    /// 根节点
    root: Option<Box<Node<T>>>,
    /// 最大条目数M
    max_entries: usize,
    /// 最小条目数m（M/2向下取整），删除后的收缩阈值
    min_entries: usize,
    /// 节点分裂算法
    split_algorithm: SplitAlgorithm,
}

impl<T> RTree<T> {
    /// 创建新的R-tree
    ///
    /// # 参数
    /// * `max_entries` - 节点最大条目数，必须 >= 2
    /// * `split_algorithm` - 节点溢出时使用的分裂算法
    pub fn new(max_entries: usize, split_algorithm: SplitAlgorithm) -> Result<Self, RTreeError> {
        Self::from_parts(None, max_entries, split_algorithm)
    }

    /// 从已有根节点和配置组装树（反序列化路径使用）
    pub(crate) fn from_parts(
        root: Option<Box<Node<T>>>,
        max_entries: usize,
        split_algorithm: SplitAlgorithm,
    ) -> Result<Self, RTreeError> {
        if max_entries < 2 {
            return Err(RTreeError::InvalidMaxEntries(max_entries));
        }

        Ok(RTree {
            root,
            max_entries,
            min_entries: max_entries / 2,
            split_algorithm,
        })
    }

    /// 检查R-tree是否为空
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// 获取根节点的引用（调试和不变量检查用）
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// 获取根节点MBR
    pub fn root_mbr(&self) -> Option<&Rectangle> {
        self.root.as_ref().map(|node| &node.mbr)
    }

    /// 获取最大条目数
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// 获取最小条目数
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// 获取分裂算法
    pub fn split_algorithm(&self) -> SplitAlgorithm {
        self.split_algorithm
    }

    /// 获取树的深度（空树为0）
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.level + 1)
    }

    /// 获取总的数据条目数量
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |node| Self::count_entries(node))
    }

    /// 统计节点中的数据条目数量
    fn count_entries(node: &Node<T>) -> usize {
        if node.is_leaf_node() {
            node.entries.len()
        } else {
            node.entries
                .iter()
                .map(|entry| match entry {
                    Entry::Node { node, .. } => Self::count_entries(node),
                    Entry::Data { .. } => 1,
                })
                .sum()
        }
    }

    /// 统计树的结构信息
    ///
    /// 空树按单个空叶子根节点统计：node_count=1，leaf_count=1，height=1
    pub fn stats(&self) -> TreeStats {
        let Some(root) = self.root.as_ref() else {
            return TreeStats {
                node_count: 1,
                leaf_count: 1,
                height: 1,
                average_node_fill: 0.0,
            };
        };

        let mut node_count = 0;
        let mut leaf_count = 0;
        let mut total_children = 0;
        Self::collect_stats(root, &mut node_count, &mut leaf_count, &mut total_children);

        TreeStats {
            node_count,
            leaf_count,
            height: root.level + 1,
            average_node_fill: total_children as f64 / node_count as f64,
        }
    }

    fn collect_stats(
        node: &Node<T>,
        node_count: &mut usize,
        leaf_count: &mut usize,
        total_children: &mut usize,
    ) {
        *node_count += 1;
        if node.is_leaf_node() {
            *leaf_count += 1;
        }
        *total_children += node.entries.len();

        for entry in &node.entries {
            if let Entry::Node { node: child, .. } = entry {
                Self::collect_stats(child, node_count, leaf_count, total_children);
            }
        }
    }

    /// 内部方法：获取根节点的可变引用
    pub(crate) fn root_mut(&mut self) -> &mut Option<Box<Node<T>>> {
        &mut self.root
    }

    /// 内部方法：获取根节点的引用
    pub(crate) fn root_ref(&self) -> &Option<Box<Node<T>>> {
        &self.root
    }

    /// 内部方法：获取最大条目数
    pub(crate) fn max_entries_internal(&self) -> usize {
        self.max_entries
    }

    /// 内部方法：获取最小条目数
    pub(crate) fn min_entries_internal(&self) -> usize {
        self.min_entries
    }
}

impl<T> Default for RTree<T> {
    /// 使用默认参数创建R-tree（M=10，二次分裂）
    fn default() -> Self {
        RTree {
            root: None,
            max_entries: 10,
            min_entries: 5,
            split_algorithm: SplitAlgorithm::Quadratic,
        }
    }
}
