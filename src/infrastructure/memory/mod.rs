//! Memory Layer - In-Memory State Management
//!
//! 实现 TaskManager，分析任务状态全部保存在内存中

mod task_manager;

pub use task_manager::{InMemoryTaskManager, DEFAULT_MAX_RETAINED};
