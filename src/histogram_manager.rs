// src/histogram_manager.rs

use tracing::{debug, info, warn};

use crate::aligner::PairAligner;
use crate::daily_series::NormalizedSeries;
use crate::error::{Result, RiskError};
use crate::growth::GrowthCalculator;
use crate::histogram::{Histogram, InsufficientSpan};
use crate::normalizer::SeriesNormalizer;
use crate::provider::SeriesProvider;
use crate::time_offset::TimeOffset;

/// Builds the risk histograms of a symbol from the series its provider returns.
pub struct HistogramManager<P> {
    provider: P,
}

impl<P: SeriesProvider> HistogramManager<P> {
    pub fn new(provider: P) -> Self {
        HistogramManager { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// One histogram per offset, in the order the offsets were given.
    ///
    /// The series is acquired and normalized once. Any acquisition failure
    /// aborts the whole call; an offset longer than the series only produces a
    /// warning and an empty histogram.
    pub async fn risk_histograms(
        &self,
        symbol: &str,
        offsets: &[TimeOffset],
        force_refresh: bool,
    ) -> Result<Vec<Histogram>> {
        // 1. Reject degenerate offsets before touching the provider
        validate_offsets(offsets)?;

        // 2. Acquire the series, refusing error payloads before any parsing
        let raw = self
            .provider
            .fetch_or_read(symbol, force_refresh)
            .await?
            .ensure_valid(symbol)?;

        // 3. Normalize once and reuse for every offset
        let series = SeriesNormalizer::normalize(&raw)?;
        info!(
            symbol,
            start = %series.start(),
            end = %series.end(),
            days = series.len(),
            "normalized daily series"
        );

        histograms_from_series(symbol, &series, offsets)
    }
}

/// Runs the per-offset pipeline on an already normalized series.
pub fn histograms_from_series(
    symbol: &str,
    series: &NormalizedSeries,
    offsets: &[TimeOffset],
) -> Result<Vec<Histogram>> {
    validate_offsets(offsets)?;

    let mut histograms = Vec::with_capacity(offsets.len());
    for (position, offset) in offsets.iter().enumerate() {
        debug!(symbol, %offset, "offset {}/{}", position + 1, offsets.len());

        let insufficient_span = if series.span() < offset.duration() {
            warn!(
                symbol,
                %offset,
                available_days = series.span().num_days(),
                "series is shorter than the holding period"
            );
            Some(InsufficientSpan {
                offset: *offset,
                available: series.span(),
            })
        } else {
            None
        };

        let pairs = PairAligner::align(series, offset);
        let samples = GrowthCalculator::calculate(&pairs, offset)?;
        histograms.push(Histogram::new(symbol, *offset, pairs, samples, insufficient_span));
    }

    Ok(histograms)
}

fn validate_offsets(offsets: &[TimeOffset]) -> Result<()> {
    match offsets.iter().find(|offset| !offset.is_positive()) {
        Some(offset) => Err(RiskError::Division(format!(
            "holding period must be positive, got {offset}"
        ))),
        None => Ok(()),
    }
}
