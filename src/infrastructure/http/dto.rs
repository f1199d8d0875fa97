//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{AnalysisTask, TaskResult};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 成功响应：`{"success": true, ...data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// ============================================================================
// 请求参数
// ============================================================================

/// 原始查询参数
///
/// 重复出现的键取第一次出现的值
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn first(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// GET /analysis
#[derive(Debug, Default)]
pub struct AnalysisParams {
    pub code: Option<String>,
    pub report_type: Option<String>,
}

impl From<QueryPairs> for AnalysisParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            code: pairs.first("code"),
            report_type: pairs.first("report_type"),
        }
    }
}

/// GET /tasks
#[derive(Debug, Default)]
pub struct TasksParams {
    pub limit: Option<String>,
}

impl From<QueryPairs> for TasksParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            limit: pairs.first("limit"),
        }
    }
}

/// GET /task, GET /report
#[derive(Debug, Default)]
pub struct TaskIdParams {
    pub id: Option<String>,
}

impl From<QueryPairs> for TaskIdParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            id: pairs.first("id"),
        }
    }
}

impl TaskIdParams {
    /// trim 后的非空 id
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// POST /update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub stock_list: String,
}

// ============================================================================
// 响应数据
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnalysisDto {
    pub message: String,
    pub code: String,
    pub task_id: String,
    pub report_type: &'static str,
    pub status: &'static str,
}

/// 任务列表条目
#[derive(Debug, Serialize)]
pub struct TaskSummaryDto {
    pub task_id: String,
    pub code: String,
    pub market: &'static str,
    pub report_type: &'static str,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&AnalysisTask> for TaskSummaryDto {
    fn from(task: &AnalysisTask) -> Self {
        Self {
            task_id: task.task_id.to_string(),
            code: task.ticker.code().to_string(),
            market: task.ticker.market().as_str(),
            report_type: task.report_type.as_str(),
            status: task.state.as_str(),
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

/// 任务详情
#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub task_id: String,
    pub code: String,
    pub market: &'static str,
    pub report_type: &'static str,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<TaskResult>,
}

impl From<AnalysisTask> for TaskDto {
    fn from(task: AnalysisTask) -> Self {
        Self {
            task_id: task.task_id.to_string(),
            code: task.ticker.code().to_string(),
            market: task.ticker.market().as_str(),
            report_type: task.report_type.as_str(),
            status: task.state.as_str(),
            created_at: task.created_at,
            started_at: task.started_at,
            completed_at: task.completed_at,
            result: task.result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListDto {
    pub tasks: Vec<TaskSummaryDto>,
}

#[derive(Debug, Serialize)]
pub struct TaskDetailDto {
    pub task: TaskDto,
}
