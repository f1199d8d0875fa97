//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：只读，不修改任务状态

mod config_queries;
mod report_queries;
mod task_queries;

pub mod handlers;

pub use config_queries::*;
pub use report_queries::*;
pub use task_queries::*;
