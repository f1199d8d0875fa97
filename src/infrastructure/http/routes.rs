//! HTTP Routes
//!
//! 路由定义

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // 配置页
        .route("/", get(handlers::index))
        .route("/update", post(handlers::update_config))
        // 健康检查
        .route("/health", get(handlers::health))
        // 分析任务
        .route("/analysis", get(handlers::submit_analysis))
        .route("/tasks", get(handlers::list_tasks))
        .route("/task", get(handlers::get_task))
        // 报告
        .route("/report", get(handlers::get_report))
        // 机器人回调
        .route("/webhook/:platform", post(handlers::handle_webhook))
}
