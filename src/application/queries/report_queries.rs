//! Report Queries - 报告查询

use crate::domain::RenderMode;

/// 获取任务报告
#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub task_id: String,
}

/// 渲染后的报告
#[derive(Debug, Clone)]
pub struct ReportView {
    pub title: String,
    /// HTML 片段（未包含页面外壳）
    pub html: String,
    pub mode: RenderMode,
}
