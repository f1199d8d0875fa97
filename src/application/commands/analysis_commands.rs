//! Analysis Commands - 分析任务相关命令

use crate::application::ports::{ReportType, TaskId, TaskState};
use crate::domain::NormalizedTicker;

/// 提交分析任务命令
#[derive(Debug, Clone)]
pub struct SubmitAnalysisCommand {
    pub ticker: NormalizedTicker,
    pub report_type: ReportType,
}

/// 提交分析响应
#[derive(Debug, Clone)]
pub struct SubmitAnalysisResponse {
    pub task_id: TaskId,
    pub code: String,
    pub report_type: ReportType,
    pub state: TaskState,
    pub message: String,
}
