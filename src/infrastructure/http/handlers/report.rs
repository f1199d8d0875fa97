//! Report Handler - 渲染 Markdown 报告为 HTML 页面

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::GetReportQuery;
use crate::infrastructure::http::dto::{QueryPairs, TaskIdParams};
use crate::infrastructure::http::error::PageError;
use crate::infrastructure::http::state::AppState;

/// GET /report?id=xxx
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    match render_report(&state, params).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            if e.status.is_server_error() {
                tracing::error!(status = e.status.as_u16(), error = %e.message, "Report page failed");
            } else {
                tracing::warn!(status = e.status.as_u16(), error = %e.message, "Report page not found");
            }
            (e.status, Html(state.pages.error_page(e.status, &e.message))).into_response()
        }
    }
}

async fn render_report(
    state: &AppState,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<String, PageError> {
    let params = TaskIdParams::from(params.map(|Query(p)| p).unwrap_or_default());
    let task_id = params
        .id()
        .ok_or_else(|| PageError::not_found("Missing required parameter: id (task id)"))?;

    let view = state
        .get_report_handler
        .handle(GetReportQuery {
            task_id: task_id.to_string(),
        })
        .await?;

    state
        .pages
        .report_page(&view.title, &view.html)
        .map_err(|e| PageError::internal(format!("Failed to render report: {}", e)))
}
