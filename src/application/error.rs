//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ConfigStoreError, TaskError};
use crate::domain::TickerError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 报告产物缺失（无路径或文件已删除）
    #[error("{0}")]
    ReportUnavailable(String),

    /// 任务提交失败
    #[error("Failed to submit task: {0}")]
    SubmissionFailed(String),

    /// 存储错误
    #[error("{0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建报告缺失错误
    pub fn report_unavailable(message: impl Into<String>) -> Self {
        Self::ReportUnavailable(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<TickerError> for ApplicationError {
    fn from(err: TickerError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<TaskError> for ApplicationError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => Self::not_found("Task", id),
            TaskError::QueueUnavailable(msg) => Self::SubmissionFailed(msg),
            TaskError::InvalidStateTransition(msg) => Self::InvalidState(msg),
            TaskError::AlreadyExists(id) => {
                Self::SubmissionFailed(format!("task id already in use: {}", id))
            }
        }
    }
}

impl From<ConfigStoreError> for ApplicationError {
    fn from(err: ConfigStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}
