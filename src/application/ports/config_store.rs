//! Config Store Port - 配置页持久化

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 自选股列表存储
pub trait ConfigStorePort: Send + Sync {
    /// 当前自选股列表（逗号分隔）
    fn stock_list(&self) -> Result<String, ConfigStoreError>;

    /// 归一化并保存，返回保存后的列表
    fn set_stock_list(&self, raw: &str) -> Result<String, ConfigStoreError>;

    /// 配置文件名（页面展示用）
    fn env_filename(&self) -> String;
}
