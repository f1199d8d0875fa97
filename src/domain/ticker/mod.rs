//! Ticker Context - 股票代码校验与归一化
//!
//! 只有经过 [`classify`] 校验的代码才能成为 [`NormalizedTicker`]，
//! 任务层不接受未校验的原始字符串。

mod classifier;
mod errors;
mod value_objects;

pub use classifier::classify;
pub use errors::TickerError;
pub use value_objects::{Market, NormalizedTicker};
