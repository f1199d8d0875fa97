//! Analysis Handlers - 提交分析任务

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ReportType, SubmitAnalysisCommand};
use crate::domain::classify;
use crate::infrastructure::http::dto::{
    AnalysisParams, ApiResponse, QueryPairs, SubmitAnalysisDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /analysis?code=xxx&report_type=simple|full
pub async fn submit_analysis(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<ApiResponse<SubmitAnalysisDto>>, ApiError> {
    let Query(pairs) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = AnalysisParams::from(pairs);

    let ticker = classify(params.code.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let report_type = ReportType::parse_or_default(params.report_type.as_deref());

    let result = state
        .submit_analysis_handler
        .handle(SubmitAnalysisCommand {
            ticker,
            report_type,
        })?;

    Ok(Json(ApiResponse::success(SubmitAnalysisDto {
        message: result.message,
        code: result.code,
        task_id: result.task_id.to_string(),
        report_type: result.report_type.as_str(),
        status: result.state.as_str(),
    })))
}
