//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod analysis_engine;
mod config_store;
mod task_manager;
mod webhook;

pub use analysis_engine::{AnalysisEnginePort, AnalysisRequest, EngineError};
pub use config_store::{ConfigStoreError, ConfigStorePort};
pub use task_manager::{
    AnalysisReport, AnalysisTask, ReportType, TaskError, TaskId, TaskManagerPort, TaskResult,
    TaskState,
};
pub use webhook::{WebhookError, WebhookPort, WebhookRequest, WebhookResponse};
