//! Domain Layer - 领域层
//!
//! - Ticker Context: 股票代码校验与归一化
//! - Report Renderer: Markdown 报告渲染

pub mod ticker;

mod report_renderer;

pub use report_renderer::{RenderMode, RenderedReport, ReportRenderer};
pub use ticker::{classify, Market, NormalizedTicker, TickerError};
