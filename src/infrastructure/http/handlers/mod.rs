//! HTTP Handlers

mod analysis;
mod config_page;
mod health;
mod report;
mod tasks;
mod webhook;

pub use analysis::*;
pub use config_page::*;
pub use health::*;
pub use report::*;
pub use tasks::*;
pub use webhook::*;
