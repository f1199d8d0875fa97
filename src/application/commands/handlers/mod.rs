//! Command Handlers 实现

mod analysis_handlers;
mod config_handlers;

pub use analysis_handlers::*;
pub use config_handlers::*;
