//! # R-tree 空间索引数据结构
//!
//! 这是一个基于 Antonin Guttman 的论文 "R-trees: A Dynamic Index Structure
//! for Spatial Searching" 的二维 R-tree 实现。
//!
//! ## 主要特性
//!
//! - 支持二维空间数据的高效索引，负载类型由调用方决定
//! - 实现了插入、删除、窗口搜索、点查询和最近邻查询
//! - 三种可选的节点分裂算法：二次分裂、线性分裂和 R* 风格分裂
//! - 自底向上的批量加载，产出平衡的打包树
//! - JSON / 二进制两种格式的持久化
//!
//! ## 使用示例
//!
//! ### 基础用法
//! ```rust
//! use rtree2d::{RTree, Rectangle, SplitAlgorithm};
//!
//! # fn main() -> Result<(), rtree2d::RTreeError> {
//! let mut tree = RTree::new(8, SplitAlgorithm::Quadratic)?;
//!
//! tree.insert(Rectangle::new(0.0, 0.0, 10.0, 10.0)?, "a");
//! tree.insert(Rectangle::new(20.0, 20.0, 30.0, 30.0)?, "b");
//!
//! let hits = tree.search(&Rectangle::new(5.0, 5.0, 25.0, 25.0)?);
//! assert_eq!(hits.len(), 2);
//!
//! let (nearest, distance) = tree.nearest(1.0, 1.0);
//! assert_eq!(nearest, Some("a"));
//! assert_eq!(distance, 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! ### 批量加载
//! ```rust
//! use rtree2d::{RTree, Rectangle, SplitAlgorithm};
//!
//! # fn main() -> Result<(), rtree2d::RTreeError> {
//! let mut tree = RTree::new(4, SplitAlgorithm::RStar)?;
//! let items = vec![
//!     (Rectangle::new(0.0, 0.0, 1.0, 1.0)?, 1),
//!     (Rectangle::new(2.0, 2.0, 3.0, 3.0)?, 2),
//!     (Rectangle::new(4.0, 0.0, 5.0, 1.0)?, 3),
//! ];
//! tree.bulk_load(items);
//! assert_eq!(tree.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod error;
pub mod node;
pub mod rectangle;
pub mod rtree;

// 重新导出主要的公共接口
pub use algorithms::persistence::{PersistenceError, SerializationFormat};
pub use error::RTreeError;
pub use node::{Entry, Node, NodeType};
pub use rectangle::Rectangle;
pub use rtree::{RTree, SplitAlgorithm, TreeStats};
