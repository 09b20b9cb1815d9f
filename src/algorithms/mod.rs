// R-tree算法模块
//
// 这个模块包含R-tree的所有核心算法实现，按功能分解为不同的子模块：
// - insert: 插入和子树选择算法
// - split: 节点分裂算法（Quadratic / Linear / R*）
// - delete: 删除、收缩和树维护算法
// - search: 窗口搜索和点查询算法
// - knn: 最近邻搜索算法
// - bulk_load: 批量加载（自底向上构建）
// - utils: 共用的路径导航和MBR调整工具
// - persistence: 持久化和序列化功能
// - debug: 调试和可视化工具

pub mod bulk_load;
pub mod debug;
pub mod delete;
pub mod insert;
pub mod knn;
pub mod persistence;
pub mod search;
pub mod split;
pub mod utils;
