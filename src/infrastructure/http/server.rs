//! HTTP Server
//!
//! 组装中间件栈并监听端口

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// 请求体上限，webhook 回调之外的接口都不带 body
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 完整应用：路由 + CORS + 请求追踪 + 错误日志 + 请求体上限
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // Router::layer 越靠后越外层
    create_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    addr: String,
    app: Router,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, state: AppState) -> Self {
        Self {
            addr: config.addr(),
            app: build_app(Arc::new(state)),
        }
    }

    /// 监听并服务，`shutdown` 完成后停止接收新连接
    pub async fn serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.addr).await?;
        tracing::info!(addr = %self.addr, "HTTP server listening");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::domain::ReportRenderer;
    use crate::infrastructure::adapters::{
        EnvFileConfigStore, HttpWebhookForwarder, HttpWebhookForwarderConfig,
    };
    use crate::infrastructure::http::templates::PageTemplates;
    use crate::infrastructure::memory::InMemoryTaskManager;

    fn app(dir: &tempfile::TempDir) -> Router {
        let (tx, _rx) = mpsc::channel(1);
        let state = AppState::new(
            InMemoryTaskManager::new(tx).arc(),
            Arc::new(EnvFileConfigStore::new(dir.path().join(".env"))),
            Arc::new(HttpWebhookForwarder::new(HttpWebhookForwarderConfig::default()).unwrap()),
            ReportRenderer::new(),
            PageTemplates::new().unwrap(),
            dir.path().to_path_buf(),
        );
        build_app(Arc::new(state))
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::get("/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::post("/webhook/feishu")
            .body(Body::from(vec![b'x'; MAX_BODY_BYTES + 1]))
            .unwrap();

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
