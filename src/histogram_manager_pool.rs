// src/histogram_manager_pool.rs

use futures::{stream, StreamExt, TryStreamExt};

use crate::error::{Result, RiskError};
use crate::histogram::Histogram;
use crate::histogram_manager::HistogramManager;
use crate::provider::SeriesProvider;
use crate::time_offset::TimeOffset;

pub struct HistogramManagerPool<P> {
    manager: HistogramManager<P>,
    symbols: Vec<String>,
}

impl<P: SeriesProvider> HistogramManagerPool<P> {
    pub fn new(provider: P, symbols: Vec<String>) -> Self {
        HistogramManagerPool {
            manager: HistogramManager::new(provider),
            symbols,
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Processes the symbols in order; the first failing symbol aborts the run.
    pub async fn process_symbols(
        &self,
        offsets: &[TimeOffset],
        force_refresh: bool,
    ) -> Result<Vec<(String, Vec<Histogram>)>> {
        stream::iter(self.symbols.iter())
            .then(|symbol| async move {
                let histograms = self
                    .manager
                    .risk_histograms(symbol, offsets, force_refresh)
                    .await?;
                Ok::<_, RiskError>((symbol.clone(), histograms))
            })
            .try_collect()
            .await
    }
}
