//! Health Handler
//!
//! 不依赖任务服务，始终返回 200

use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::infrastructure::http::dto::HealthResponse;

pub const SERVICE_NAME: &str = "stock-analysis-webui";

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        service: SERVICE_NAME,
    })
}
