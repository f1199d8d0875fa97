//! HTTP Layer - 请求分发
//!
//! 解析请求参数，调用分类器/任务服务/报告渲染，映射为 HTTP 响应

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

pub use error::{ApiError, PageError};
pub use routes::create_routes;
pub use server::{build_app, HttpServer};
pub use state::AppState;
pub use templates::PageTemplates;
