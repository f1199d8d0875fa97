//! Task Handlers - 任务列表与状态查询

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetTaskQuery, ListTasksQuery};
use crate::infrastructure::http::dto::{
    ApiResponse, QueryPairs, TaskDetailDto, TaskIdParams, TaskListDto, TaskSummaryDto,
    TasksParams,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /tasks?limit=n
///
/// limit 非法时回落到默认值，不会返回错误
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Json<ApiResponse<TaskListDto>> {
    let params = TasksParams::from(params.map(|Query(p)| p).unwrap_or_default());
    let query = ListTasksQuery::from_raw(params.limit.as_deref());

    let result = state.list_tasks_handler.handle(query);

    Json(ApiResponse::success(TaskListDto {
        tasks: result.tasks.iter().map(TaskSummaryDto::from).collect(),
    }))
}

/// GET /task?id=xxx
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<ApiResponse<TaskDetailDto>>, ApiError> {
    let Query(pairs) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = TaskIdParams::from(pairs);
    let task_id = params
        .id()
        .ok_or_else(|| ApiError::BadRequest("Missing required parameter: id (task id)".to_string()))?;

    let task = state.get_task_handler.handle(GetTaskQuery {
        task_id: task_id.to_string(),
    })?;

    Ok(Json(ApiResponse::success(TaskDetailDto { task: task.into() })))
}
