//! Ticker Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("Missing required parameter: code (stock code)")]
    Missing,

    #[error(
        "Invalid stock code format: {0} (A-share: 6 digits / HK: hk + 5 digits / US: 1-5 letters, optional .X suffix)"
    )]
    InvalidFormat(String),
}
