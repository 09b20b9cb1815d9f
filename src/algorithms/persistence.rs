use crate::error::RTreeError;
use crate::node::Node;
use crate::rtree::{RTree, SplitAlgorithm};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 持久化错误类型
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("invalid or empty tree file")]
    InvalidFormat,
    #[error(transparent)]
    Config(#[from] RTreeError),
}

/// 序列化格式枚举
#[derive(Debug, Clone, Copy)]
pub enum SerializationFormat {
    /// JSON格式 - 可读性好，方便调试
    Json,
    /// 二进制格式 - 性能好，体积小
    Binary,
}

impl SerializationFormat {
    /// 根据文件扩展名自动判断格式
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => SerializationFormat::Json,
            _ => SerializationFormat::Binary,
        }
    }
}

/// R-tree持久化功能实现
///
/// 序列化的内容是节点层级本身（根节点及其整棵子树）。
/// 树的配置（容量与分裂算法）不进入文件，由加载方重新提供；
/// 节点间的从属关系在所有权结构中自然保留，加载后无需重建
impl<T: Serialize> RTree<T> {
    /// 导出到文件
    ///
    /// 根据文件扩展名自动选择序列化格式：
    /// - .json -> JSON格式（调试友好）
    /// - 其他 -> 二进制格式（高性能）
    pub fn dump_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let format = SerializationFormat::from_extension(&path);
        self.dump_to_file_with_format(path, format)
    }

    /// 使用指定格式导出到文件
    ///
    /// 先写入同目录下的临时文件再原子性重命名，
    /// 避免中途失败留下半个文件
    pub fn dump_to_file_with_format<P: AsRef<Path>>(
        &self,
        path: P,
        format: SerializationFormat,
    ) -> Result<(), PersistenceError> {
        let path = path.as_ref();

        let temp_path = path.with_extension(format!(
            "{}.tmp",
            path.extension().unwrap_or_default().to_string_lossy()
        ));

        let data = match format {
            SerializationFormat::Json => serde_json::to_vec_pretty(self.root_ref())?,
            SerializationFormat::Binary => bincode::serialize(self.root_ref())?,
        };

        fs::write(&temp_path, data)?;
        fs::rename(temp_path, path)?;

        debug!(path = %path.display(), "tree dumped");
        Ok(())
    }
}

impl<T: DeserializeOwned> RTree<T> {
    /// 从文件加载R-tree
    ///
    /// 文件中只有节点层级，容量和分裂算法由调用方提供，
    /// 校验规则与构造函数相同
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        max_entries: usize,
        split_algorithm: SplitAlgorithm,
    ) -> Result<Self, PersistenceError> {
        let format = SerializationFormat::from_extension(&path);
        Self::load_from_file_with_format(path, format, max_entries, split_algorithm)
    }

    /// 使用指定格式从文件加载R-tree
    pub fn load_from_file_with_format<P: AsRef<Path>>(
        path: P,
        format: SerializationFormat,
        max_entries: usize,
        split_algorithm: SplitAlgorithm,
    ) -> Result<Self, PersistenceError> {
        let data = fs::read(path)?;
        if data.is_empty() {
            return Err(PersistenceError::InvalidFormat);
        }

        let root: Option<Box<Node<T>>> = match format {
            SerializationFormat::Json => serde_json::from_slice(&data)?,
            SerializationFormat::Binary => bincode::deserialize(&data)?,
        };

        Ok(RTree::from_parts(root, max_entries, split_algorithm)?)
    }
}
