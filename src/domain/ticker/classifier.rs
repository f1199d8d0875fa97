//! 股票代码分类器
//!
//! 输入先 trim + 小写，再依次匹配：
//! - A 股: `^[0-9]{6}$`
//! - 港股: `^hk[0-9]{5}$`
//! - 美股: 大写后匹配 `^[A-Z]{1,5}(\.[A-Z])?$`

use regex::Regex;
use std::sync::LazyLock;

use super::errors::TickerError;
use super::value_objects::{Market, NormalizedTicker};

static A_SHARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("A-share pattern is valid"));
static HONG_KONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^hk[0-9]{5}$").expect("HK pattern is valid"));
static US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,5}(\.[A-Z])?$").expect("US pattern is valid"));

/// 校验并归一化股票代码
///
/// 空白输入返回 [`TickerError::Missing`]，其余不匹配的输入返回
/// [`TickerError::InvalidFormat`]（携带小写后的代码）。
pub fn classify(raw: &str) -> Result<NormalizedTicker, TickerError> {
    let code = raw.trim().to_lowercase();
    if code.is_empty() {
        return Err(TickerError::Missing);
    }

    if A_SHARE.is_match(&code) {
        return Ok(NormalizedTicker::new(code, Market::AShare));
    }
    if HONG_KONG.is_match(&code) {
        return Ok(NormalizedTicker::new(code, Market::HongKong));
    }

    let upper = code.to_uppercase();
    if US.is_match(&upper) {
        return Ok(NormalizedTicker::new(upper, Market::Us));
    }

    Err(TickerError::InvalidFormat(code))
}
