//! Ticker Context - Value Objects

use serde::Serialize;

/// 市场分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    /// A 股（6 位数字）
    AShare,
    /// 港股（hk + 5 位数字）
    #[serde(rename = "hk")]
    HongKong,
    /// 美股（1-5 个字母，可带 .X 交易所后缀）
    Us,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::AShare => "a_share",
            Market::HongKong => "hk",
            Market::Us => "us",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 归一化后的股票代码
///
/// 字段私有，只能通过 `classify` 构造
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedTicker {
    code: String,
    market: Market,
}

impl NormalizedTicker {
    pub(super) fn new(code: String, market: Market) -> Self {
        Self { code, market }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn market(&self) -> Market {
        self.market
    }
}

impl std::fmt::Display for NormalizedTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}
