//! HTTP Webhook Forwarder - 机器人回调透传
//!
//! POST {bot_url}/webhook/{platform}，请求头与原始 body 原样转发，
//! 返回 Bot 服务的状态码与 JSON body。

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{WebhookError, WebhookPort, WebhookRequest, WebhookResponse};

/// 不转发的逐跳/由客户端重新计算的请求头
const SKIPPED_HEADERS: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "keep-alive",
    "upgrade",
];

/// 转发器配置
#[derive(Debug, Clone)]
pub struct HttpWebhookForwarderConfig {
    /// Bot 服务基础 URL；未配置时 Webhook 不可用
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpWebhookForwarderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

pub struct HttpWebhookForwarder {
    client: Client,
    config: HttpWebhookForwarderConfig,
}

impl HttpWebhookForwarder {
    pub fn new(config: HttpWebhookForwarderConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebhookError::Upstream(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn webhook_url(&self, platform: &str) -> Option<String> {
        self.config
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| format!("{}/webhook/{}", url.trim_end_matches('/'), platform))
    }
}

#[async_trait]
impl WebhookPort for HttpWebhookForwarder {
    async fn handle(&self, request: WebhookRequest) -> Result<WebhookResponse, WebhookError> {
        let url = self
            .webhook_url(&request.platform)
            .ok_or(WebhookError::Unavailable)?;

        let mut builder = self.client.post(&url);
        for (name, value) in &request.headers {
            if SKIPPED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(
            platform = %request.platform,
            url = %url,
            body_len = request.body.len(),
            "Forwarding webhook"
        );

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| WebhookError::Upstream(e.to_string()))?;

        let status_code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WebhookError::Upstream(e.to_string()))?;

        // 空 body 或非 JSON 统一包装，保持 JSON 响应
        let body = if bytes.is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                WebhookError::Upstream(format!("invalid JSON from bot service: {}", e))
            })?
        };

        Ok(WebhookResponse { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Bytes,
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::post,
        Json, Router,
    };
    use std::collections::HashMap;

    /// 本地 Bot 服务：回显收到的平台、签名头与 body
    async fn bot_webhook(
        Path(platform): Path<String>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        match platform.as_str() {
            "silent" => StatusCode::NO_CONTENT.into_response(),
            "text" => (StatusCode::OK, "not json").into_response(),
            _ => (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "platform": platform,
                    "signature": headers.get("x-lark-signature").and_then(|v| v.to_str().ok()),
                    "keep_alive": headers.contains_key("keep-alive"),
                    "body": String::from_utf8_lossy(&body),
                })),
            )
                .into_response(),
        }
    }

    async fn spawn_bot() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route("/webhook/:platform", post(bot_webhook));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn forwarder_for(base_url: String) -> HttpWebhookForwarder {
        HttpWebhookForwarder::new(HttpWebhookForwarderConfig {
            base_url: Some(base_url),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn request(platform: &str, body: &str) -> WebhookRequest {
        let headers = HashMap::from([
            ("x-lark-signature".to_string(), "sig-123".to_string()),
            ("keep-alive".to_string(), "timeout=5".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ]);
        WebhookRequest {
            platform: platform.to_string(),
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_relays_status_headers_and_body() {
        let forwarder = forwarder_for(spawn_bot().await);

        let response = forwarder
            .handle(request("feishu", r#"{"challenge":"abc"}"#))
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.body["platform"], "feishu");
        assert_eq!(response.body["signature"], "sig-123");
        assert_eq!(response.body["keep_alive"], false);
        assert_eq!(response.body["body"], r#"{"challenge":"abc"}"#);
    }

    #[tokio::test]
    async fn test_empty_upstream_body_becomes_empty_object() {
        let forwarder = forwarder_for(spawn_bot().await);

        let response = forwarder.handle(request("silent", "{}")).await.unwrap();

        assert_eq!(response.status_code, 204);
        assert_eq!(response.body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_non_json_upstream_body_is_error() {
        let forwarder = forwarder_for(spawn_bot().await);

        let err = forwarder.handle(request("text", "{}")).await.unwrap_err();
        assert!(matches!(err, WebhookError::Upstream(msg) if msg.contains("invalid JSON")));
    }

    #[tokio::test]
    async fn test_unreachable_bot_is_upstream_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = forwarder_for(format!("http://{}", addr))
            .handle(request("feishu", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_is_unavailable() {
        let forwarder = HttpWebhookForwarder::new(HttpWebhookForwarderConfig::default()).unwrap();
        let err = forwarder
            .handle(WebhookRequest {
                platform: "feishu".to_string(),
                headers: HashMap::new(),
                body: b"{}".to_vec(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Unavailable));
    }

    #[test]
    fn test_webhook_url() {
        let forwarder = HttpWebhookForwarder::new(HttpWebhookForwarderConfig {
            base_url: Some("http://bot:9000/".to_string()),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            forwarder.webhook_url("telegram").as_deref(),
            Some("http://bot:9000/webhook/telegram")
        );
    }
}
