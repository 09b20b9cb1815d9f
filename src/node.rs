use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};

/// R-tree节点类型
///
/// 用于明确区分R-tree中的两种节点类型，避免概念混淆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// 叶子节点：包含用户插入的真实数据条目
    Leaf,
    /// 索引节点：包含指向子节点的引用条目
    Index,
}

/// R-tree节点条目
///
/// 每个条目都包含一个MBR（最小边界矩形）和对应的内容：
/// - Data条目：存储用户插入的真实数据，只出现在叶子节点中
/// - Node条目：存储子节点的引用，只出现在索引节点中
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entry<T> {
    /// 数据条目：数据的MBR和用户负载
    Data { mbr: Rectangle, data: T },

    /// 节点条目：子节点的MBR（包含该子节点所有条目的MBR）和子节点本身
    Node { mbr: Rectangle, node: Box<Node<T>> },
}

impl<T> Entry<T> {
    /// 获取条目的MBR（最小边界矩形）
    pub fn mbr(&self) -> &Rectangle {
        match self {
            Entry::Data { mbr, .. } => mbr,
            Entry::Node { mbr, .. } => mbr,
        }
    }

    /// 检查是否为数据条目
    pub fn is_data(&self) -> bool {
        matches!(self, Entry::Data { .. })
    }

    /// 获取数据条目的负载引用（节点条目返回None）
    pub fn data(&self) -> Option<&T> {
        match self {
            Entry::Data { data, .. } => Some(data),
            Entry::Node { .. } => None,
        }
    }

    /// 获取节点条目的子节点引用（数据条目返回None）
    pub fn child(&self) -> Option<&Node<T>> {
        match self {
            Entry::Data { .. } => None,
            Entry::Node { node, .. } => Some(node),
        }
    }
}

/// R-tree节点
///
/// R-tree的核心数据结构，表示树中的一个节点。
/// 父节点通过条目独占持有子节点，向上引用由根到节点的索引路径表达，
/// 节点本身不存储父指针
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<T> {
    /// 节点的最小边界矩形，等于所有条目MBR的并集
    pub mbr: Rectangle,

    /// 节点包含的条目列表
    ///
    /// 叶子节点只包含Entry::Data条目，索引节点只包含Entry::Node条目
    pub entries: Vec<Entry<T>>,

    /// 节点类型
    pub node_type: NodeType,

    /// 节点在树中的层级：叶子层为0，根节点层级最高
    pub level: usize,
}

impl<T> Node<T> {
    /// 创建新的叶子节点（层级固定为0）
    pub fn new_leaf_node() -> Self {
        Node {
            mbr: Rectangle::default(),
            entries: Vec::new(),
            node_type: NodeType::Leaf,
            level: 0,
        }
    }

    /// 创建新的索引节点
    ///
    /// # 参数
    /// * `level` - 节点在树中的层级，必须 > 0
    pub fn new_index_node(level: usize) -> Self {
        Node {
            mbr: Rectangle::default(),
            entries: Vec::new(),
            node_type: NodeType::Index,
            level,
        }
    }

    /// 创建指定类型和层级的节点
    pub fn new(node_type: NodeType, level: usize) -> Self {
        Node {
            mbr: Rectangle::default(),
            entries: Vec::new(),
            node_type,
            level,
        }
    }

    /// 检查是否为叶子节点
    pub fn is_leaf_node(&self) -> bool {
        matches!(self.node_type, NodeType::Leaf)
    }

    /// 检查是否为索引节点
    pub fn is_index_node(&self) -> bool {
        matches!(self.node_type, NodeType::Index)
    }

    /// 更新节点的MBR以包含所有条目
    pub fn update_mbr(&mut self) {
        let mut iter = self.entries.iter();
        let Some(first) = iter.next() else {
            self.mbr = Rectangle::default();
            return;
        };

        let mut mbr = *first.mbr();
        for entry in iter {
            mbr = mbr.union(entry.mbr());
        }
        self.mbr = mbr;
    }

    /// 添加条目到节点并更新MBR
    ///
    /// 调用者需要确保条目类型与节点类型匹配：
    /// 叶子节点只能添加Entry::Data条目，索引节点只能添加Entry::Node条目
    pub fn add_entry(&mut self, entry: Entry<T>) {
        self.entries.push(entry);
        self.update_mbr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let leaf_node: Node<i32> = Node::new_leaf_node();
        assert!(leaf_node.is_leaf_node());
        assert!(!leaf_node.is_index_node());
        assert_eq!(leaf_node.level, 0);
        assert_eq!(leaf_node.node_type, NodeType::Leaf);

        let index_node: Node<i32> = Node::new_index_node(1);
        assert!(!index_node.is_leaf_node());
        assert!(index_node.is_index_node());
        assert_eq!(index_node.level, 1);
        assert_eq!(index_node.node_type, NodeType::Index);
    }

    #[test]
    fn test_node_update_mbr() {
        let mut node = Node::new_leaf_node();

        node.add_entry(Entry::Data {
            mbr: Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap(),
            data: 1,
        });
        node.add_entry(Entry::Data {
            mbr: Rectangle::new(3.0, 3.0, 8.0, 8.0).unwrap(),
            data: 2,
        });

        assert_eq!(node.mbr, Rectangle::new(0.0, 0.0, 8.0, 8.0).unwrap());
    }

    #[test]
    fn test_node_update_mbr_empty() {
        let mut node: Node<i32> = Node::new_leaf_node();
        node.update_mbr();
        assert_eq!(node.mbr, Rectangle::default());
    }

    #[test]
    fn test_entry_operations() {
        let data_entry = Entry::Data {
            mbr: Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap(),
            data: 42,
        };

        assert!(data_entry.is_data());
        assert_eq!(data_entry.data(), Some(&42));
        assert_eq!(data_entry.mbr(), &Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap());
        assert!(data_entry.child().is_none());

        let child_node: Box<Node<i32>> = Box::new(Node::new_leaf_node());
        let node_entry = Entry::Node {
            mbr: Rectangle::new(1.0, 1.0, 6.0, 6.0).unwrap(),
            node: child_node,
        };

        assert!(!node_entry.is_data());
        assert_eq!(node_entry.data(), None);
        assert_eq!(node_entry.mbr(), &Rectangle::new(1.0, 1.0, 6.0, 6.0).unwrap());
        assert!(node_entry.child().is_some());
    }
}
