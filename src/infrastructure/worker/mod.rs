//! Worker Layer - 后台任务处理
//!
//! AnalysisWorker: 从队列消费分析任务并调用分析引擎

mod analysis_worker;

pub use analysis_worker::{AnalysisWorker, AnalysisWorkerConfig};
