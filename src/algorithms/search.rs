use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 搜索操作相关算法
impl<T: Clone> RTree<T> {
    /// 搜索与查询矩形相交的所有条目 - 遵循论文Algorithm Search
    ///
    /// 相交采用闭区间语义，与查询矩形仅边缘接触的条目也会命中。
    /// 结果顺序为树的遍历顺序，不构成稳定契约
    pub fn search(&self, query: &Rectangle) -> Vec<T> {
        let mut results = Vec::new();

        if let Some(root) = self.root_ref().as_deref() {
            Self::search_recursive(root, query, &mut results);
        }

        results
    }

    /// 递归搜索 - 剪掉MBR与查询矩形不相交的子树
    fn search_recursive(node: &Node<T>, query: &Rectangle, results: &mut Vec<T>) {
        for entry in &node.entries {
            if entry.mbr().intersects(query) {
                match entry {
                    Entry::Data { data, .. } => {
                        results.push(data.clone());
                    }
                    Entry::Node { node: child, .. } => {
                        Self::search_recursive(child, query, results);
                    }
                }
            }
        }
    }

    /// 点查询 - 返回包含指定点的所有条目
    ///
    /// 与窗口搜索相同的下降方式，但全程使用包含点判定
    pub fn point_query(&self, x: f64, y: f64) -> Vec<T> {
        let mut results = Vec::new();

        if let Some(root) = self.root_ref().as_deref() {
            Self::point_query_recursive(root, x, y, &mut results);
        }

        results
    }

    /// 递归点查询 - 剪掉MBR不包含该点的子树
    fn point_query_recursive(node: &Node<T>, x: f64, y: f64, results: &mut Vec<T>) {
        for entry in &node.entries {
            if entry.mbr().contains_point(x, y) {
                match entry {
                    Entry::Data { data, .. } => {
                        results.push(data.clone());
                    }
                    Entry::Node { node: child, .. } => {
                        Self::point_query_recursive(child, x, y, results);
                    }
                }
            }
        }
    }
}
