//! Stock WebUI - 股票分析 Web 前端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Ticker: 股票代码分类与归一化
//! - ReportRenderer: Markdown 报告渲染
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TaskManager, AnalysisEngine, ConfigStore, Webhook）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API + HTML 页面
//! - Memory: TaskManager 内存实现
//! - Worker: AnalysisWorker 后台任务处理
//! - Adapters: 分析引擎、dotenv 配置存储、Bot 转发

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
