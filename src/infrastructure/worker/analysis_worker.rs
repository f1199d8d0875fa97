//! Analysis Worker - Background Analysis Task Processor

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

use crate::application::ports::{AnalysisEnginePort, AnalysisRequest, TaskId, TaskManagerPort};

/// Worker 配置
#[derive(Debug, Clone)]
pub struct AnalysisWorkerConfig {
    /// 最大并发分析数
    pub max_concurrent: usize,
}

impl Default for AnalysisWorkerConfig {
    fn default() -> Self {
        Self { max_concurrent: 3 }
    }
}

/// 分析 Worker
///
/// 从队列消费任务 ID，驱动 Pending → Running → Completed/Failed
pub struct AnalysisWorker {
    config: AnalysisWorkerConfig,
    queue_receiver: mpsc::Receiver<TaskId>,
    task_manager: Arc<dyn TaskManagerPort>,
    engine: Arc<dyn AnalysisEnginePort>,
}

impl AnalysisWorker {
    pub fn new(
        config: AnalysisWorkerConfig,
        queue_receiver: mpsc::Receiver<TaskId>,
        task_manager: Arc<dyn TaskManagerPort>,
        engine: Arc<dyn AnalysisEnginePort>,
    ) -> Self {
        Self {
            config,
            queue_receiver,
            task_manager,
            engine,
        }
    }

    /// 启动 Worker，队列发送端全部关闭后返回
    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent = self.config.max_concurrent,
            "AnalysisWorker started"
        );

        // 使用 semaphore 控制并发
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));

        while let Some(task_id) = self.queue_receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!(task_id = %task_id, error = %e, "Failed to acquire semaphore permit");
                    continue;
                }
            };

            let task_manager = self.task_manager.clone();
            let engine = self.engine.clone();

            tokio::spawn(async move {
                let _permit = permit; // 持有 permit 直到任务完成

                // 分析过程 panic 也要落到 Failed
                let handle = tokio::spawn(Self::process_task(
                    task_id.clone(),
                    task_manager.clone(),
                    engine,
                ));
                if let Err(e) = handle.await {
                    tracing::error!(task_id = %task_id, error = %e, "Analysis aborted");
                    if let Err(e) = task_manager
                        .fail(task_id.as_str(), format!("analysis aborted: {}", e))
                    {
                        tracing::error!(
                            task_id = %task_id,
                            error = %e,
                            "Failed to mark aborted task as failed"
                        );
                    }
                }
            });
        }

        tracing::info!("AnalysisWorker stopped");
    }

    /// 处理单个任务
    async fn process_task(
        task_id: TaskId,
        task_manager: Arc<dyn TaskManagerPort>,
        engine: Arc<dyn AnalysisEnginePort>,
    ) {
        let task = match task_manager.get_task(task_id.as_str()) {
            Some(t) => t,
            None => {
                tracing::warn!(task_id = %task_id, "Task not found, skipping");
                return;
            }
        };

        if let Err(e) = task_manager.mark_running(task_id.as_str()) {
            tracing::error!(task_id = %task_id, error = %e, "Failed to update task state");
            return;
        }

        let request = AnalysisRequest {
            task_id: task_id.clone(),
            ticker: task.ticker.clone(),
            report_type: task.report_type,
        };

        tracing::info!(
            task_id = %task_id,
            code = %task.ticker,
            report_type = task.report_type.as_str(),
            "Analysis started"
        );

        match engine.analyze(request).await {
            Ok(report) => {
                let report_path = report
                    .report_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                if let Err(e) = task_manager.complete(task_id.as_str(), report) {
                    tracing::error!(task_id = %task_id, error = %e, "Failed to record completion");
                    return;
                }
                tracing::info!(task_id = %task_id, report_path = %report_path, "Analysis completed");
            }
            Err(e) => {
                tracing::error!(task_id = %task_id, error = %e, "Analysis failed");
                if let Err(e) = task_manager.fail(task_id.as_str(), e.to_string()) {
                    tracing::error!(task_id = %task_id, error = %e, "Failed to record failure");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AnalysisReport, AnalysisTask, EngineError, ReportType, TaskError, TaskResult, TaskState,
    };
    use crate::domain::{classify, NormalizedTicker};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::infrastructure::memory::InMemoryTaskManager;
    use async_trait::async_trait;
    use std::time::Duration;

    struct ScriptedEngine;

    #[async_trait]
    impl AnalysisEnginePort for ScriptedEngine {
        async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, EngineError> {
            match request.ticker.code() {
                "000001" => Err(EngineError::ServiceError("data source down".to_string())),
                "000002" => panic!("engine bug"),
                code => Ok(AnalysisReport {
                    code: code.to_string(),
                    name: "Scripted".to_string(),
                    report_path: Some(format!("reports/{}.md", request.task_id).into()),
                    summary: Some("ok".to_string()),
                }),
            }
        }
    }

    async fn wait_terminal(manager: &InMemoryTaskManager, task_id: &str) -> TaskState {
        for _ in 0..200 {
            if let Some(task) = manager.get_task(task_id) {
                if task.state.is_terminal() {
                    return task.state;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("task {task_id} did not finish");
    }

    fn start() -> Arc<InMemoryTaskManager> {
        let (tx, rx) = mpsc::channel(16);
        let manager = Arc::new(InMemoryTaskManager::new(tx));
        let worker = AnalysisWorker::new(
            AnalysisWorkerConfig { max_concurrent: 2 },
            rx,
            manager.clone(),
            Arc::new(ScriptedEngine),
        );
        tokio::spawn(worker.run());
        manager
    }

    #[tokio::test]
    async fn test_success_completes_task() {
        let manager = start();
        let id = manager
            .submit(classify("600519").unwrap(), ReportType::Simple)
            .unwrap()
            .task_id
            .to_string();

        assert_eq!(wait_terminal(&manager, &id).await, TaskState::Completed);
        let task = manager.get_task(&id).unwrap();
        assert!(task.started_at.is_some());
        assert!(task.result.unwrap().report_path().is_some());
    }

    #[tokio::test]
    async fn test_engine_error_fails_task() {
        let manager = start();
        let id = manager
            .submit(classify("000001").unwrap(), ReportType::Full)
            .unwrap()
            .task_id
            .to_string();

        assert_eq!(wait_terminal(&manager, &id).await, TaskState::Failed);
        match manager.get_task(&id).unwrap().result {
            Some(TaskResult::Error { error }) => assert!(error.contains("data source down")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_engine_panic_fails_task() {
        let manager = start();
        let id = manager
            .submit(classify("000002").unwrap(), ReportType::Simple)
            .unwrap()
            .task_id
            .to_string();

        assert_eq!(wait_terminal(&manager, &id).await, TaskState::Failed);
    }

    /// 拒绝写入 Failed 的任务管理器，其余操作委托给内存实现
    struct RefusingFailManager {
        inner: InMemoryTaskManager,
        fail_calls: AtomicUsize,
    }

    impl TaskManagerPort for RefusingFailManager {
        fn submit(
            &self,
            ticker: NormalizedTicker,
            report_type: ReportType,
        ) -> Result<AnalysisTask, TaskError> {
            self.inner.submit(ticker, report_type)
        }

        fn get_task(&self, task_id: &str) -> Option<AnalysisTask> {
            self.inner.get_task(task_id)
        }

        fn list_recent(&self, limit: usize) -> Vec<AnalysisTask> {
            self.inner.list_recent(limit)
        }

        fn mark_running(&self, task_id: &str) -> Result<(), TaskError> {
            self.inner.mark_running(task_id)
        }

        fn complete(&self, task_id: &str, report: AnalysisReport) -> Result<(), TaskError> {
            self.inner.complete(task_id, report)
        }

        fn fail(&self, task_id: &str, _error: String) -> Result<(), TaskError> {
            self.fail_calls.fetch_add(1, Ordering::SeqCst);
            Err(TaskError::InvalidStateTransition(task_id.to_string()))
        }
    }

    #[tokio::test]
    async fn test_refused_failure_after_panic_keeps_worker_running() {
        let (tx, rx) = mpsc::channel(16);
        let manager = Arc::new(RefusingFailManager {
            inner: InMemoryTaskManager::new(tx),
            fail_calls: AtomicUsize::new(0),
        });
        tokio::spawn(
            AnalysisWorker::new(
                AnalysisWorkerConfig { max_concurrent: 1 },
                rx,
                manager.clone(),
                Arc::new(ScriptedEngine),
            )
            .run(),
        );

        let panicked = manager
            .submit(classify("000002").unwrap(), ReportType::Simple)
            .unwrap()
            .task_id
            .to_string();
        let next = manager
            .submit(classify("600519").unwrap(), ReportType::Simple)
            .unwrap()
            .task_id
            .to_string();

        assert_eq!(wait_terminal(&manager.inner, &next).await, TaskState::Completed);
        assert_eq!(manager.fail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            manager.get_task(&panicked).unwrap().state,
            TaskState::Running
        );
    }
}
