// src/provider.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{Result, RiskError};
use crate::raw_series::RawSeries;
use crate::session::AlphaVantageSession;

/// Source of raw daily series, cached or freshly fetched.
///
/// Implementations must turn an explicit error payload into
/// [`RiskError::Provider`] instead of returning it as a series.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn fetch_or_read(&self, symbol: &str, force_refresh: bool) -> Result<RawSeries>;
}

/// Alpha Vantage `TIME_SERIES_DAILY` client backed by a per-symbol JSON cache.
pub struct AlphaVantageProvider {
    session: AlphaVantageSession,
    cache: SeriesCache,
}

impl AlphaVantageProvider {
    pub fn new(config: ProviderConfig) -> Self {
        AlphaVantageProvider {
            session: AlphaVantageSession::new(&config),
            cache: SeriesCache {
                data_dir: config.data_dir,
            },
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.cache.data_dir
    }

    pub fn already_cached(&self, symbol: &str) -> Result<bool> {
        Ok(self.cache.path_for(symbol)?.is_file())
    }

    /// Downloads the series and replaces the cached copy.
    ///
    /// Error payloads are raised and never written to the cache.
    pub async fn download(&self, symbol: &str) -> Result<RawSeries> {
        let path = self.cache.path_for(symbol)?;
        let body = self.session.send_request(symbol).await?;
        let raw = RawSeries::parse(&body)?.ensure_valid(symbol)?;

        self.cache.write(&path, &raw).await?;
        info!(symbol, path = %path.display(), "downloaded daily series");
        Ok(raw)
    }

    pub async fn read_cached(&self, symbol: &str) -> Result<RawSeries> {
        let path = self.cache.path_for(symbol)?;
        debug!(symbol, path = %path.display(), "reading cached daily series");
        self.cache.read(&path).await?.ensure_valid(symbol)
    }

    /// Fetches several symbols one after another, stopping at the first failure.
    pub async fn fetch_many<S: AsRef<str>>(&self, symbols: &[S], force_refresh: bool) -> Result<Vec<RawSeries>> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            series.push(self.fetch_or_read(symbol.as_ref(), force_refresh).await?);
        }
        Ok(series)
    }
}

#[async_trait]
impl SeriesProvider for AlphaVantageProvider {
    async fn fetch_or_read(&self, symbol: &str, force_refresh: bool) -> Result<RawSeries> {
        if !force_refresh && self.already_cached(symbol)? {
            self.read_cached(symbol).await
        } else {
            self.download(symbol).await
        }
    }
}

/// One `<symbol>.json` file per series under a fixed directory.
struct SeriesCache {
    data_dir: PathBuf,
}

impl SeriesCache {
    fn path_for(&self, symbol: &str) -> Result<PathBuf> {
        let usable = !symbol.is_empty()
            && symbol != "."
            && symbol != ".."
            && !symbol.contains(['/', '\\']);
        if !usable {
            return Err(RiskError::InvalidSymbol(symbol.to_string()));
        }
        Ok(self.data_dir.join(format!("{symbol}.json")))
    }

    async fn read(&self, path: &Path) -> Result<RawSeries> {
        let text = fs::read_to_string(path).await?;
        RawSeries::parse(&text)
    }

    async fn write(&self, path: &Path, raw: &RawSeries) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        fs::write(path, raw.to_json_string()?).await?;
        Ok(())
    }
}
