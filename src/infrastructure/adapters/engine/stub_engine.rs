//! Stub Analysis Engine - 本地开发用的分析引擎
//!
//! 不做任何计算，只把一份占位 Markdown 报告写到报告目录

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{AnalysisEnginePort, AnalysisReport, AnalysisRequest, EngineError};

/// Stub 引擎配置
#[derive(Debug, Clone)]
pub struct StubAnalysisEngineConfig {
    /// 报告输出目录
    pub reports_dir: PathBuf,
    /// 模拟分析耗时
    pub delay: Duration,
}

impl Default for StubAnalysisEngineConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            delay: Duration::from_millis(200),
        }
    }
}

/// Stub 分析引擎
pub struct StubAnalysisEngine {
    config: StubAnalysisEngineConfig,
}

impl StubAnalysisEngine {
    pub fn new(config: StubAnalysisEngineConfig) -> Self {
        tracing::info!(
            reports_dir = %config.reports_dir.display(),
            "StubAnalysisEngine initialized"
        );
        Self { config }
    }

    fn render_report(request: &AnalysisRequest) -> String {
        format!(
            "# {code} 分析报告\n\n\
             | 项目 | 内容 |\n\
             | --- | --- |\n\
             | 代码 | {code} |\n\
             | 市场 | {market} |\n\
             | 报告类型 | {report_type} |\n\
             | 生成时间 | {at} |\n\n\
             > 本报告由 stub 引擎生成，不包含真实分析结论。\n",
            code = request.ticker.code(),
            market = request.ticker.market(),
            report_type = request.report_type.as_str(),
            at = Utc::now().format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

#[async_trait]
impl AnalysisEnginePort for StubAnalysisEngine {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, EngineError> {
        tokio::time::sleep(self.config.delay).await;

        tokio::fs::create_dir_all(&self.config.reports_dir)
            .await
            .map_err(|e| EngineError::ReportWriteError(e.to_string()))?;

        let report_path = self
            .config
            .reports_dir
            .join(format!("{}.md", request.task_id));
        tokio::fs::write(&report_path, Self::render_report(&request))
            .await
            .map_err(|e| EngineError::ReportWriteError(e.to_string()))?;

        tracing::debug!(
            task_id = %request.task_id,
            path = %report_path.display(),
            "Stub report written"
        );

        Ok(AnalysisReport {
            code: request.ticker.code().to_string(),
            name: request.ticker.code().to_string(),
            report_path: Some(report_path),
            summary: None,
        })
    }
}
