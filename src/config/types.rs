//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 分析任务配置
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Web UI 配置
    #[serde(default)]
    pub webui: WebUiConfig,

    /// Bot 服务配置
    #[serde(default)]
    pub bot: BotConfig,

    /// 报告渲染配置
    #[serde(default)]
    pub report: ReportConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 分析引擎类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// 本地占位引擎，只生成示例报告
    #[default]
    Stub,
    /// 外部分析服务
    Http,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Http => "http",
        }
    }
}

/// 分析任务配置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// 引擎类型: stub / http
    #[serde(default)]
    pub engine: EngineKind,

    /// 外部分析服务基础 URL（engine = http 时使用）
    #[serde(default = "default_engine_url")]
    pub engine_url: String,

    /// 单次分析超时（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// 最大并发分析数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 任务队列容量，满时提交直接失败
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// 保留的任务数上限，超出后淘汰最旧的已结束任务
    #[serde(default = "default_max_retained")]
    pub max_retained: usize,

    /// 报告输出目录（stub 引擎）
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// stub 引擎模拟耗时（毫秒）
    #[serde(default = "default_stub_delay_ms")]
    pub stub_delay_ms: u64,
}

fn default_engine_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_engine_timeout() -> u64 {
    600
}

fn default_max_concurrent() -> usize {
    3
}

fn default_queue_capacity() -> usize {
    100
}

fn default_max_retained() -> usize {
    1000
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_stub_delay_ms() -> u64 {
    200
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            engine_url: default_engine_url(),
            timeout_secs: default_engine_timeout(),
            max_concurrent: default_max_concurrent(),
            queue_capacity: default_queue_capacity(),
            max_retained: default_max_retained(),
            reports_dir: default_reports_dir(),
            stub_delay_ms: default_stub_delay_ms(),
        }
    }
}

/// Web UI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct WebUiConfig {
    /// 自选股列表所在的 dotenv 文件
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
        }
    }
}

/// Bot 服务配置
///
/// 未配置 url 时 webhook 路由返回 "Bot module not available"
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_bot_timeout")]
    pub timeout_secs: u64,
}

fn default_bot_timeout() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_bot_timeout(),
        }
    }
}

/// 报告渲染配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// 是否将 Markdown 渲染为 HTML（需要 markdown feature）
    #[serde(default = "default_markdown")]
    pub markdown: bool,
}

fn default_markdown() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            markdown: default_markdown(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
