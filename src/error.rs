// src/error.rs

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while acquiring a series or building its risk histograms.
///
/// Every variant is fatal for the orchestration call that produced it. A span
/// shorter than a requested offset is not an error; see
/// [`InsufficientSpan`](crate::histogram::InsufficientSpan).
#[derive(Debug, Error)]
pub enum RiskError {
    /// The data source answered with an explicit error payload instead of a series.
    #[error("provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    /// The raw series is structurally invalid or holds no usable prices.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// A zero or negative holding period was supplied.
    #[error("division error: {0}")]
    Division(String),

    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cache i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
}

impl RiskError {
    pub fn provider(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RiskError>;
