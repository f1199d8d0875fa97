//! In-Memory Task Manager Implementation

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::application::ports::{
    AnalysisReport, AnalysisTask, ReportType, TaskError, TaskId, TaskManagerPort, TaskResult,
    TaskState,
};
use crate::domain::NormalizedTicker;

/// 默认保留的任务数
pub const DEFAULT_MAX_RETAINED: usize = 1000;

/// 内存任务管理器
pub struct InMemoryTaskManager {
    /// task_id -> AnalysisTask
    tasks: DashMap<String, AnalysisTask>,
    /// 提交序号
    sequence: AtomicU64,
    /// 超出后淘汰最旧的终态任务
    max_retained: usize,
    /// 任务队列发送端
    queue_sender: mpsc::Sender<TaskId>,
}

impl InMemoryTaskManager {
    pub fn new(queue_sender: mpsc::Sender<TaskId>) -> Self {
        Self::with_retention(queue_sender, DEFAULT_MAX_RETAINED)
    }

    pub fn with_retention(queue_sender: mpsc::Sender<TaskId>, max_retained: usize) -> Self {
        Self {
            tasks: DashMap::new(),
            sequence: AtomicU64::new(0),
            max_retained: max_retained.max(1),
            queue_sender,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn transition<F>(&self, task_id: &str, next: TaskState, apply: F) -> Result<(), TaskError>
    where
        F: FnOnce(&mut AnalysisTask),
    {
        let mut task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskError::NotFound(task_id.to_string()))?;

        let old_state = task.state;
        if !old_state.can_transition_to(next) {
            return Err(TaskError::InvalidStateTransition(format!(
                "{}: {} -> {}",
                task_id,
                old_state.as_str(),
                next.as_str()
            )));
        }

        task.state = next;
        apply(&mut task);

        tracing::debug!(
            task_id = %task_id,
            old_state = ?old_state,
            new_state = ?next,
            "Task state changed"
        );
        Ok(())
    }

    /// 淘汰最旧的终态任务，未结束的任务不会被淘汰
    fn evict_terminal(&self) {
        let overflow = self.tasks.len().saturating_sub(self.max_retained);
        if overflow == 0 {
            return;
        }

        let mut terminal: Vec<(u64, String)> = self
            .tasks
            .iter()
            .filter(|t| t.state.is_terminal())
            .map(|t| (t.sequence, t.key().clone()))
            .collect();
        terminal.sort_unstable();

        for (_, task_id) in terminal.into_iter().take(overflow) {
            self.tasks.remove(&task_id);
        }
        tracing::debug!(overflow = overflow, "Evicted finished tasks");
    }
}

impl TaskManagerPort for InMemoryTaskManager {
    fn submit(
        &self,
        ticker: NormalizedTicker,
        report_type: ReportType,
    ) -> Result<AnalysisTask, TaskError> {
        // 先占住队列位置，队列满或 worker 已退出时不创建任务
        let permit = self.queue_sender.try_reserve().map_err(|e| match e {
            TrySendError::Full(_) => TaskError::QueueUnavailable("analysis queue is full".to_string()),
            TrySendError::Closed(_) => {
                TaskError::QueueUnavailable("analysis worker is not running".to_string())
            }
        })?;

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let task = AnalysisTask::new(ticker, report_type, sequence);

        match self.tasks.entry(task.task_id.to_string()) {
            Entry::Occupied(_) => return Err(TaskError::AlreadyExists(task.task_id.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(task.clone());
            }
        }

        permit.send(task.task_id.clone());
        tracing::debug!(task_id = %task.task_id, "Task enqueued");

        self.evict_terminal();
        Ok(task)
    }

    fn get_task(&self, task_id: &str) -> Option<AnalysisTask> {
        self.tasks.get(task_id).map(|t| t.clone())
    }

    fn list_recent(&self, limit: usize) -> Vec<AnalysisTask> {
        let mut tasks: Vec<AnalysisTask> = self.tasks.iter().map(|t| t.clone()).collect();
        // 提交序号与创建时间同序
        tasks.sort_unstable_by(|a, b| b.sequence.cmp(&a.sequence));
        tasks.truncate(limit);
        tasks
    }

    fn mark_running(&self, task_id: &str) -> Result<(), TaskError> {
        self.transition(task_id, TaskState::Running, |task| {
            task.started_at = Some(Utc::now());
        })
    }

    fn complete(&self, task_id: &str, report: AnalysisReport) -> Result<(), TaskError> {
        self.transition(task_id, TaskState::Completed, |task| {
            task.result = Some(TaskResult::Report(report));
            task.completed_at = Some(Utc::now());
        })
    }

    fn fail(&self, task_id: &str, error: String) -> Result<(), TaskError> {
        self.transition(task_id, TaskState::Failed, |task| {
            task.result = Some(TaskResult::Error { error });
            task.completed_at = Some(Utc::now());
        })
    }
}
