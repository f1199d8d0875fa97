//! Webhook Port - 机器人平台回调转发
//!
//! 本层不校验平台签名，由下游 Bot 服务负责

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Bot module not available")]
    Unavailable,

    #[error("Bot service error: {0}")]
    Upstream(String),
}

/// 转发给 Bot 服务的原始请求
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    /// 平台名称 (feishu, dingtalk, wecom, telegram)
    pub platform: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Bot 服务的处理结果
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait WebhookPort: Send + Sync {
    async fn handle(&self, request: WebhookRequest) -> Result<WebhookResponse, WebhookError>;
}
