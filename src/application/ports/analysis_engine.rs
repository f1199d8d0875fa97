//! Analysis Engine Port - 股票分析引擎抽象
//!
//! 财务计算与报告生成由外部服务完成，这里只约定调用接口

use async_trait::async_trait;
use thiserror::Error;

use super::task_manager::{AnalysisReport, ReportType, TaskId};
use crate::domain::NormalizedTicker;

/// 分析引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Report write error: {0}")]
    ReportWriteError(String),
}

/// 分析请求
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub task_id: TaskId,
    pub ticker: NormalizedTicker,
    pub report_type: ReportType,
}

/// Analysis Engine Port
#[async_trait]
pub trait AnalysisEnginePort: Send + Sync {
    /// 执行一次分析，成功时报告文件已落盘
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, EngineError>;

    /// 检查分析服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
