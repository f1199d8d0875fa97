//! Stock WebUI - 股票分析 Web 前端
//!
//! - Domain: ticker/, report_renderer
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, worker, adapters

use std::sync::Arc;
use std::time::Duration;

use stock_webui::application::AnalysisEnginePort;
use stock_webui::config::{load_config, print_config, EngineKind};
use stock_webui::domain::ReportRenderer;
use stock_webui::infrastructure::adapters::{
    EnvFileConfigStore, HttpAnalysisEngine, HttpAnalysisEngineConfig, HttpWebhookForwarder,
    HttpWebhookForwarderConfig, StubAnalysisEngine, StubAnalysisEngineConfig,
};
use stock_webui::infrastructure::http::{AppState, HttpServer, PageTemplates};
use stock_webui::infrastructure::memory::InMemoryTaskManager;
use stock_webui::infrastructure::worker::{AnalysisWorker, AnalysisWorkerConfig};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},stock_webui={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Stock WebUI - 股票分析 Web 前端");
    print_config(&config);

    // 创建分析引擎
    let engine: Arc<dyn AnalysisEnginePort> = match config.analysis.engine {
        EngineKind::Http => Arc::new(HttpAnalysisEngine::new(HttpAnalysisEngineConfig {
            base_url: config.analysis.engine_url.clone(),
            timeout_secs: config.analysis.timeout_secs,
        })?),
        EngineKind::Stub => {
            tokio::fs::create_dir_all(&config.analysis.reports_dir).await?;
            Arc::new(StubAnalysisEngine::new(StubAnalysisEngineConfig {
                reports_dir: config.analysis.reports_dir.clone(),
                delay: Duration::from_millis(config.analysis.stub_delay_ms),
            }))
        }
    };

    if !engine.health_check().await {
        tracing::warn!("Analysis engine health check failed, tasks may fail until it recovers");
    }

    // 创建任务队列与任务管理器
    let (task_tx, task_rx) = mpsc::channel(config.analysis.queue_capacity);
    let task_manager = Arc::new(InMemoryTaskManager::with_retention(
        task_tx,
        config.analysis.max_retained,
    ));

    // 启动 AnalysisWorker
    let worker = AnalysisWorker::new(
        AnalysisWorkerConfig {
            max_concurrent: config.analysis.max_concurrent,
        },
        task_rx,
        task_manager.clone(),
        engine,
    );
    tokio::spawn(worker.run());

    // 配置存储与 Bot 转发
    let config_store = Arc::new(EnvFileConfigStore::new(&config.webui.env_file));
    let webhook = Arc::new(HttpWebhookForwarder::new(HttpWebhookForwarderConfig {
        base_url: config.bot.url.clone(),
        timeout_secs: config.bot.timeout_secs,
    })?);

    let renderer = ReportRenderer::with_markdown(config.report.markdown);
    if config.report.markdown && !ReportRenderer::markdown_available() {
        tracing::warn!("report.markdown is enabled but the markdown feature is not compiled in");
    }

    let pages = PageTemplates::new()?;
    let working_dir = std::env::current_dir()?;

    // 创建 HTTP 服务器
    let state = AppState::new(
        task_manager,
        config_store,
        webhook,
        renderer,
        pages,
        working_dir,
    );
    let server = HttpServer::new(&config.server, state);

    // 启动服务器（带优雅关闭）
    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
