// src/config.rs

use std::env;
use std::path::PathBuf;

use crate::error::{Result, RiskError};

pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_DATA_DIR: &str = "../data/alphavantage_data";
pub const API_KEY_ENV: &str = "ALPHAVANTAGEKEY";

// Free-tier quota of the daily endpoint.
pub const REQUESTS_PER_MINUTE: u32 = 5;
pub const MAX_BURST_REQUESTS: u32 = 5;

/// Maximum distance between `t + Δ` and the observation matched to it.
pub const MATCHING_TOLERANCE_DAYS: i64 = 10;

/// Length of the year used to annualize growth (365 days, no leap correction).
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Settings for [`AlphaVantageProvider`](crate::provider::AlphaVantageProvider).
///
/// Built explicitly by the caller; nothing in the crate reads process state
/// except [`ProviderConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub data_dir: PathBuf,
    pub api_key: String,
    pub base_url: String,
    pub requests_per_minute: u32,
    pub max_burst_requests: u32,
}

impl ProviderConfig {
    pub fn new(data_dir: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        ProviderConfig {
            data_dir: data_dir.into(),
            api_key: api_key.into(),
            base_url: ALPHA_VANTAGE_URL.to_string(),
            requests_per_minute: REQUESTS_PER_MINUTE,
            max_burst_requests: MAX_BURST_REQUESTS,
        }
    }

    /// Reads the API key from `ALPHAVANTAGEKEY` and uses the default data directory.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RiskError::Config(format!("{API_KEY_ENV} is not set")))?;
        Ok(ProviderConfig::new(DEFAULT_DATA_DIR, api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_rate_limit(mut self, requests_per_minute: u32, max_burst_requests: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self.max_burst_requests = max_burst_requests;
        self
    }
}
