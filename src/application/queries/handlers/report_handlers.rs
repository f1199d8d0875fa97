//! Report Query Handlers
//!
//! 解析任务的报告路径，读取 Markdown 文件并渲染为 HTML 片段

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{TaskManagerPort, TaskResult};
use crate::application::queries::report_queries::{GetReportQuery, ReportView};
use crate::domain::ReportRenderer;

/// GetReport Handler
pub struct GetReportHandler {
    task_manager: Arc<dyn TaskManagerPort>,
    renderer: ReportRenderer,
    /// 相对报告路径的解析基准（进程工作目录）
    working_dir: PathBuf,
}

impl GetReportHandler {
    pub fn new(
        task_manager: Arc<dyn TaskManagerPort>,
        renderer: ReportRenderer,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            task_manager,
            renderer,
            working_dir,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<ReportView, ApplicationError> {
        let task = self
            .task_manager
            .get_task(&query.task_id)
            .ok_or_else(|| ApplicationError::not_found("Task", query.task_id.clone()))?;

        let report = match &task.result {
            Some(TaskResult::Report(report)) => report,
            _ => return Err(ApplicationError::report_unavailable("Report file not found")),
        };
        let report_path = report
            .report_path
            .as_deref()
            .ok_or_else(|| ApplicationError::report_unavailable("Report file not found"))?;

        let path = self.resolve(report_path);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    task_id = %query.task_id,
                    path = %path.display(),
                    "Report file missing on disk"
                );
                return Err(ApplicationError::report_unavailable(
                    "Report file not found on disk",
                ));
            }
            Err(e) => {
                tracing::error!(
                    task_id = %query.task_id,
                    path = %path.display(),
                    error = %e,
                    "Failed to read report file"
                );
                return Err(ApplicationError::StorageError(format!(
                    "Failed to read report: {}",
                    e
                )));
            }
        };

        let rendered = self.renderer.render(&source);
        tracing::debug!(
            task_id = %query.task_id,
            mode = ?rendered.mode,
            bytes = source.len(),
            "Report rendered"
        );

        Ok(ReportView {
            title: format!("分析报告 - {}({})", report.name, report.code),
            html: rendered.html,
            mode: rendered.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AnalysisReport, ReportType};
    use crate::domain::{classify, RenderMode};
    use crate::infrastructure::memory::InMemoryTaskManager;
    use tokio::sync::mpsc;

    fn completed_task(
        manager: &InMemoryTaskManager,
        report_path: Option<PathBuf>,
    ) -> String {
        let task = manager
            .submit(classify("600519").unwrap(), ReportType::Simple)
            .unwrap();
        let id = task.task_id.to_string();
        manager.mark_running(&id).unwrap();
        manager
            .complete(
                &id,
                AnalysisReport {
                    code: "600519".to_string(),
                    name: "贵州茅台".to_string(),
                    report_path,
                    summary: None,
                },
            )
            .unwrap();
        id
    }

    fn handler(manager: Arc<InMemoryTaskManager>, dir: &Path) -> GetReportHandler {
        GetReportHandler::new(manager, ReportRenderer::plain(), dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_relative_path_resolved_against_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("reports")).unwrap();
        std::fs::write(dir.path().join("reports/600519.md"), "# 报告").unwrap();

        let (tx, _rx) = mpsc::channel(8);
        let manager = Arc::new(InMemoryTaskManager::new(tx));
        let id = completed_task(&manager, Some(PathBuf::from("reports/600519.md")));

        let view = handler(manager, dir.path())
            .handle(GetReportQuery { task_id: id })
            .await
            .unwrap();
        assert_eq!(view.mode, RenderMode::Fallback);
        assert_eq!(view.html, "<pre># 报告</pre>");
        assert_eq!(view.title, "分析报告 - 贵州茅台(600519)");
    }

    #[tokio::test]
    async fn test_unknown_task() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(8);
        let manager = Arc::new(InMemoryTaskManager::new(tx));

        let err = handler(manager, dir.path())
            .handle(GetReportQuery {
                task_id: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_pending_task_has_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(8);
        let manager = Arc::new(InMemoryTaskManager::new(tx));
        let task = manager
            .submit(classify("AAPL").unwrap(), ReportType::Full)
            .unwrap();

        let err = handler(manager, dir.path())
            .handle(GetReportQuery {
                task_id: task.task_id.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ReportUnavailable(_)));
    }

    #[tokio::test]
    async fn test_deleted_artifact_is_unavailable_not_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.md");
        std::fs::write(&path, "# 报告").unwrap();

        let (tx, _rx) = mpsc::channel(8);
        let manager = Arc::new(InMemoryTaskManager::new(tx));
        let id = completed_task(&manager, Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let err = handler(manager, dir.path())
            .handle(GetReportQuery { task_id: id })
            .await
            .unwrap_err();
        match err {
            ApplicationError::ReportUnavailable(msg) => assert!(msg.contains("on disk")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_artifact_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // 目录无法按文本读取
        let (tx, _rx) = mpsc::channel(8);
        let manager = Arc::new(InMemoryTaskManager::new(tx));
        let id = completed_task(&manager, Some(dir.path().to_path_buf()));

        let err = handler(manager, dir.path())
            .handle(GetReportQuery { task_id: id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::StorageError(_)));
    }
}
