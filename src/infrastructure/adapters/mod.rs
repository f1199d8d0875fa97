//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod bot;
pub mod config_store;
pub mod engine;

pub use bot::*;
pub use config_store::*;
pub use engine::*;
