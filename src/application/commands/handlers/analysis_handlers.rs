//! Analysis Command Handlers

use std::sync::Arc;

use crate::application::commands::analysis_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::TaskManagerPort;

/// SubmitAnalysis Handler - 提交分析任务
///
/// 只负责创建任务并入队，不等待分析完成
pub struct SubmitAnalysisHandler {
    task_manager: Arc<dyn TaskManagerPort>,
}

impl SubmitAnalysisHandler {
    pub fn new(task_manager: Arc<dyn TaskManagerPort>) -> Self {
        Self { task_manager }
    }

    pub fn handle(
        &self,
        cmd: SubmitAnalysisCommand,
    ) -> Result<SubmitAnalysisResponse, ApplicationError> {
        let code = cmd.ticker.code().to_string();
        let market = cmd.ticker.market();

        let task = self
            .task_manager
            .submit(cmd.ticker, cmd.report_type)
            .map_err(|e| {
                tracing::error!(code = %code, error = %e, "Failed to submit analysis task");
                ApplicationError::from(e)
            })?;

        tracing::info!(
            task_id = %task.task_id,
            code = %code,
            market = %market,
            report_type = task.report_type.as_str(),
            "Analysis task submitted"
        );

        Ok(SubmitAnalysisResponse {
            task_id: task.task_id,
            code,
            report_type: task.report_type,
            state: task.state,
            message: "Analysis task submitted".to_string(),
        })
    }
}
