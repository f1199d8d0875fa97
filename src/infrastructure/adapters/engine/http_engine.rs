//! HTTP Analysis Engine - 调用外部分析服务
//!
//! 外部分析 API:
//! POST {base_url}/api/analyze
//! Request:  {"task_id": "...", "code": "600519", "market": "a_share", "report_type": "simple"}
//! Response: {"code": "600519", "name": "贵州茅台", "report_path": "reports/...md", "summary": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{AnalysisEnginePort, AnalysisReport, AnalysisRequest, EngineError};

/// 分析请求体 (JSON)
#[derive(Debug, Serialize)]
struct AnalyzeHttpRequest<'a> {
    task_id: &'a str,
    code: &'a str,
    market: &'a str,
    report_type: &'a str,
}

/// 分析响应体 (JSON)
#[derive(Debug, Deserialize)]
struct AnalyzeHttpResponse {
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    report_path: Option<PathBuf>,
    #[serde(default)]
    summary: Option<String>,
}

/// HTTP 分析引擎配置
#[derive(Debug, Clone)]
pub struct HttpAnalysisEngineConfig {
    /// 分析服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpAnalysisEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout_secs: 600,
        }
    }
}

/// HTTP 分析引擎
pub struct HttpAnalysisEngine {
    client: Client,
    config: HttpAnalysisEngineConfig,
}

impl HttpAnalysisEngine {
    pub fn new(config: HttpAnalysisEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.config.base_url.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AnalysisEnginePort for HttpAnalysisEngine {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, EngineError> {
        let body = AnalyzeHttpRequest {
            task_id: request.task_id.as_str(),
            code: request.ticker.code(),
            market: request.ticker.market().as_str(),
            report_type: request.report_type.as_str(),
        };

        tracing::debug!(
            url = %self.analyze_url(),
            task_id = %request.task_id,
            "Sending analysis request"
        );

        let response = self
            .client
            .post(self.analyze_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else if e.is_connect() {
                    EngineError::NetworkError(format!("Cannot connect to analysis service: {}", e))
                } else {
                    EngineError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: AnalyzeHttpResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        Ok(AnalysisReport {
            code: parsed.code,
            name: parsed.name,
            report_path: parsed.report_path,
            summary: parsed.summary,
        })
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.health_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let engine = HttpAnalysisEngine::new(HttpAnalysisEngineConfig {
            base_url: "http://analysis:8001/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(engine.analyze_url(), "http://analysis:8001/api/analyze");
        assert_eq!(engine.health_url(), "http://analysis:8001/health");
    }

    #[test]
    fn test_response_defaults() {
        let parsed: AnalyzeHttpResponse =
            serde_json::from_str(r#"{"code": "AAPL"}"#).unwrap();
        assert_eq!(parsed.code, "AAPL");
        assert!(parsed.name.is_empty());
        assert!(parsed.report_path.is_none());
    }
}
