//! Task Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AnalysisTask, TaskManagerPort};
use crate::application::queries::task_queries::{GetTaskQuery, ListTasksQuery, ListTasksResponse};

/// GetTask Handler - 查询单个任务状态
pub struct GetTaskHandler {
    task_manager: Arc<dyn TaskManagerPort>,
}

impl GetTaskHandler {
    pub fn new(task_manager: Arc<dyn TaskManagerPort>) -> Self {
        Self { task_manager }
    }

    pub fn handle(&self, query: GetTaskQuery) -> Result<AnalysisTask, ApplicationError> {
        self.task_manager
            .get_task(&query.task_id)
            .ok_or_else(|| ApplicationError::not_found("Task", query.task_id))
    }
}

/// ListTasks Handler - 最近任务列表
pub struct ListTasksHandler {
    task_manager: Arc<dyn TaskManagerPort>,
}

impl ListTasksHandler {
    pub fn new(task_manager: Arc<dyn TaskManagerPort>) -> Self {
        Self { task_manager }
    }

    pub fn handle(&self, query: ListTasksQuery) -> ListTasksResponse {
        ListTasksResponse {
            tasks: self.task_manager.list_recent(query.limit),
        }
    }
}
