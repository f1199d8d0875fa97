//! Webhook Handler - 机器人平台回调透传

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{WebhookError, WebhookRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /webhook/{platform}
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let headers: HashMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let response = state
        .webhook
        .handle(WebhookRequest {
            platform: platform.clone(),
            headers,
            body: body.to_vec(),
        })
        .await
        .map_err(|e| match e {
            WebhookError::Unavailable => ApiError::Internal(e.to_string()),
            WebhookError::Upstream(msg) => {
                ApiError::Internal(format!("Webhook {} failed: {}", platform, msg))
            }
        })?;

    let status = StatusCode::from_u16(response.status_code).map_err(|_| {
        ApiError::Internal(format!(
            "Webhook {} returned invalid status code {}",
            platform, response.status_code
        ))
    })?;

    Ok((status, Json(response.body)))
}
