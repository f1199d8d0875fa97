//! Query Handlers 实现

mod config_handlers;
mod report_handlers;
mod task_handlers;

pub use config_handlers::*;
pub use report_handlers::*;
pub use task_handlers::*;
