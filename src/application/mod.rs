//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TaskManager、AnalysisEngine、ConfigStore、Webhook）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{SubmitAnalysisHandler, UpdateStockListHandler},
    SubmitAnalysisCommand, SubmitAnalysisResponse, UpdateStockListCommand,
    UpdateStockListResponse,
};

pub use error::ApplicationError;

pub use ports::{
    // Analysis engine
    AnalysisEnginePort,
    AnalysisRequest,
    EngineError,
    // Config store
    ConfigStoreError,
    ConfigStorePort,
    // Task manager
    AnalysisReport,
    AnalysisTask,
    ReportType,
    TaskError,
    TaskId,
    TaskManagerPort,
    TaskResult,
    TaskState,
    // Webhook
    WebhookError,
    WebhookPort,
    WebhookRequest,
    WebhookResponse,
};

pub use queries::{
    handlers::{GetReportHandler, GetStockListHandler, GetTaskHandler, ListTasksHandler},
    GetReportQuery, GetStockListQuery, GetTaskQuery, ListTasksQuery, ListTasksResponse,
    ReportView, StockListView, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
