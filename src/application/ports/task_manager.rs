//! Task Manager Port - 分析任务生命周期
//!
//! 定义任务管理的抽象接口，具体实现在 infrastructure/memory 层
//!
//! 状态机: Pending → Running → {Completed, Failed}
//! 终态任务不可再变更，`result` 只在进入终态时写入一次。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::NormalizedTicker;

/// Task Manager 错误
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Analysis queue unavailable: {0}")]
    QueueUnavailable(String),
}

/// 任务 ID
///
/// 格式 `<code>_<YYYYMMDD>_<HHMMSS>_<seq>`，`seq` 为进程内单调递增序号，
/// 同一秒内对同一代码的多次提交也不会冲突。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn compose(ticker: &NormalizedTicker, at: DateTime<Utc>, seq: u64) -> Self {
        Self(format!(
            "{}_{}_{:04}",
            ticker.code(),
            at.format("%Y%m%d_%H%M%S"),
            seq
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 报告类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// 精简报告
    #[default]
    Simple,
    /// 完整报告
    Full,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Simple => "simple",
            ReportType::Full => "full",
        }
    }

    /// 宽松解析，未知取值回落到 `Simple`
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("full") => ReportType::Full,
            _ => ReportType::Simple,
        }
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// 已提交，等待执行
    Pending,
    /// 正在分析
    Running,
    /// 分析完成
    Completed,
    /// 分析失败
    Failed,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }

    /// 合法迁移：Pending → Running → Completed | Failed
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (TaskState::Pending, TaskState::Running)
                | (TaskState::Running, TaskState::Completed)
                | (TaskState::Running, TaskState::Failed)
        )
    }
}

/// 分析产出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub code: String,
    pub name: String,
    /// Markdown 报告文件路径（相对路径基于工作目录解析）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// 任务结果，仅在终态出现
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskResult {
    Report(AnalysisReport),
    Error { error: String },
}

impl TaskResult {
    pub fn report_path(&self) -> Option<&PathBuf> {
        match self {
            TaskResult::Report(report) => report.report_path.as_ref(),
            TaskResult::Error { .. } => None,
        }
    }
}

/// 分析任务
#[derive(Debug, Clone)]
pub struct AnalysisTask {
    pub task_id: TaskId,
    pub ticker: NormalizedTicker,
    pub report_type: ReportType,
    pub state: TaskState,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<TaskResult>,
    /// 提交序号，同一时间戳下的排序依据
    pub sequence: u64,
}

impl AnalysisTask {
    pub fn new(ticker: NormalizedTicker, report_type: ReportType, sequence: u64) -> Self {
        let now = Utc::now();
        Self {
            task_id: TaskId::compose(&ticker, now, sequence),
            ticker,
            report_type,
            state: TaskState::Pending,
            created_at: now,
            started_at: None,
            completed_at: None,
            result: None,
            sequence,
        }
    }
}

/// Task Manager Port
///
/// 任务存储的唯一写入方，HTTP 层只通过查询方法读取
pub trait TaskManagerPort: Send + Sync {
    /// 创建 Pending 任务并投递到执行队列
    ///
    /// 队列不可用时返回 `QueueUnavailable`，且不会创建任务
    fn submit(
        &self,
        ticker: NormalizedTicker,
        report_type: ReportType,
    ) -> Result<AnalysisTask, TaskError>;

    /// 获取任务
    fn get_task(&self, task_id: &str) -> Option<AnalysisTask>;

    /// 按创建时间倒序列出最近的任务
    fn list_recent(&self, limit: usize) -> Vec<AnalysisTask>;

    /// Pending → Running
    fn mark_running(&self, task_id: &str) -> Result<(), TaskError>;

    /// Running → Completed，写入分析产出
    fn complete(&self, task_id: &str, report: AnalysisReport) -> Result<(), TaskError>;

    /// Running → Failed，写入错误信息
    fn fail(&self, task_id: &str, error: String) -> Result<(), TaskError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;
    use chrono::TimeZone;

    #[test]
    fn test_task_id_is_readable_and_unique_per_sequence() {
        let ticker = classify("600519").unwrap();
        let at = Utc.with_ymd_and_hms(2026, 1, 19, 10, 30, 0).unwrap();

        let first = TaskId::compose(&ticker, at, 1);
        let second = TaskId::compose(&ticker, at, 2);

        assert_eq!(first.as_str(), "600519_20260119_103000_0001");
        assert_ne!(first, second);
    }

    #[test]
    fn test_state_machine() {
        use TaskState::*;

        assert!(Pending.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Running.can_transition_to(Failed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Failed));
        assert!(!Running.can_transition_to(Pending));
        for terminal in [Completed, Failed] {
            assert!(terminal.is_terminal());
            for next in [Pending, Running, Completed, Failed] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_report_type_parsing() {
        assert_eq!(ReportType::parse_or_default(None), ReportType::Simple);
        assert_eq!(ReportType::parse_or_default(Some("simple")), ReportType::Simple);
        assert_eq!(ReportType::parse_or_default(Some(" FULL ")), ReportType::Full);
        assert_eq!(ReportType::parse_or_default(Some("detailed")), ReportType::Simple);
    }

    #[test]
    fn test_result_serialization() {
        let report = TaskResult::Report(AnalysisReport {
            code: "600519".to_string(),
            name: "贵州茅台".to_string(),
            report_path: Some(PathBuf::from("reports/600519.md")),
            summary: None,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report_path"], "reports/600519.md");
        assert_eq!(json["name"], "贵州茅台");
        assert!(json.get("summary").is_none());

        let failed = TaskResult::Error {
            error: "engine timeout".to_string(),
        };
        assert_eq!(serde_json::to_value(&failed).unwrap()["error"], "engine timeout");
    }
}
