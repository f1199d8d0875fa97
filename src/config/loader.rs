//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, EngineKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "STOCK_WEBUI";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STOCK_WEBUI_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STOCK_WEBUI_SERVER__PORT=8080`
/// - `STOCK_WEBUI_ANALYSIS__ENGINE=http`
/// - `STOCK_WEBUI_ANALYSIS__ENGINE_URL=http://analyzer:8001`
/// - `STOCK_WEBUI_BOT__URL=http://bot:9000`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("analysis.engine", "stub")?
        .set_default("analysis.engine_url", "http://localhost:8001")?
        .set_default("analysis.timeout_secs", 600)?
        .set_default("analysis.max_concurrent", 3)?
        .set_default("analysis.queue_capacity", 100)?
        .set_default("analysis.max_retained", 1000)?
        .set_default("analysis.reports_dir", "reports")?
        .set_default("analysis.stub_delay_ms", 200)?
        .set_default("webui.env_file", ".env")?
        .set_default("bot.timeout_secs", 30)?
        .set_default("report.markdown", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.analysis.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.max_concurrent must be at least 1".to_string(),
        ));
    }

    if config.analysis.queue_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.queue_capacity must be at least 1".to_string(),
        ));
    }

    if config.analysis.engine == EngineKind::Http && config.analysis.engine_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.engine_url cannot be empty when engine = http".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Analysis Engine: {}", config.analysis.engine.as_str());
    if config.analysis.engine == EngineKind::Http {
        tracing::info!("Engine URL: {}", config.analysis.engine_url);
        tracing::info!("Engine Timeout: {}s", config.analysis.timeout_secs);
    } else {
        tracing::info!("Reports Directory: {:?}", config.analysis.reports_dir);
    }
    tracing::info!("Max Concurrent: {}", config.analysis.max_concurrent);
    tracing::info!("Queue Capacity: {}", config.analysis.queue_capacity);
    tracing::info!("Env File: {:?}", config.webui.env_file);
    match &config.bot.url {
        Some(url) => tracing::info!("Bot URL: {}", url),
        None => tracing::info!("Bot URL: (not configured)"),
    }
    tracing::info!("Markdown Rendering: {}", config.report.markdown);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_concurrency_or_queue() {
        let mut config = AppConfig::default();
        config.analysis.max_concurrent = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.analysis.queue_capacity = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_engine_url_only_required_for_http() {
        let mut config = AppConfig::default();
        config.analysis.engine_url = String::new();
        assert!(validate_config(&config).is_ok());

        config.analysis.engine = EngineKind::Http;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_toml(
            r#"
            [server]
            port = 9100

            [analysis]
            engine = "http"
            engine_url = "http://analyzer:8001"

            [bot]
            url = "http://bot:9000"
            "#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.analysis.engine, EngineKind::Http);
        assert_eq!(config.analysis.engine_url, "http://analyzer:8001");
        assert_eq!(config.analysis.queue_capacity, 100);
        assert_eq!(config.bot.url.as_deref(), Some("http://bot:9000"));
        assert!(config.report.markdown);
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let file = write_toml("[analysis]\nmax_concurrent = 0\n");
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
