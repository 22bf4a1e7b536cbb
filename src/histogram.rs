// src/histogram.rs

use chrono::Duration;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::aligner::ValuePair;
use crate::time_offset::TimeOffset;

/// The series of a symbol was shorter than a requested holding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientSpan {
    pub offset: TimeOffset,
    pub available: Duration,
}

/// Annualized growth samples of one symbol for one holding period.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    symbol: String,
    offset: TimeOffset,
    pairs: Vec<ValuePair>,
    samples: Vec<f64>,
    insufficient_span: Option<InsufficientSpan>,
}

/// Descriptive statistics of a non-empty histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN for a single sample.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub p05: f64,
    pub p95: f64,
    /// Share of samples below zero.
    pub loss_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Histogram {
    pub(crate) fn new(
        symbol: &str,
        offset: TimeOffset,
        pairs: Vec<ValuePair>,
        samples: Vec<f64>,
        insufficient_span: Option<InsufficientSpan>,
    ) -> Self {
        Histogram {
            symbol: symbol.to_string(),
            offset,
            pairs,
            samples,
            insufficient_span,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn offset(&self) -> TimeOffset {
        self.offset
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn pairs(&self) -> &[ValuePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn insufficient_span(&self) -> Option<&InsufficientSpan> {
        self.insufficient_span.as_ref()
    }

    pub fn summary(&self) -> Option<HistogramSummary> {
        if self.samples.is_empty() {
            return None;
        }

        let (min, max) = bounds(&self.samples);
        let losses = self.samples.iter().filter(|sample| **sample < 0.0).count();
        let mut ordered = Data::new(self.samples.clone());

        Some(HistogramSummary {
            count: self.samples.len(),
            mean: self.samples.iter().mean(),
            std_dev: self.samples.iter().std_dev(),
            min,
            max,
            median: ordered.quantile(0.5),
            p05: ordered.quantile(0.05),
            p95: ordered.quantile(0.95),
            loss_probability: losses as f64 / self.samples.len() as f64,
        })
    }

    /// Counts per equal-width bin between the smallest and largest sample.
    ///
    /// The last bin is closed on both ends. All samples land in a single bin
    /// when they are identical.
    pub fn bins(&self, bin_count: usize) -> Vec<HistogramBin> {
        if self.samples.is_empty() || bin_count == 0 {
            return Vec::new();
        }

        let (min, max) = bounds(&self.samples);
        if max <= min {
            return vec![HistogramBin {
                lower: min,
                upper: max,
                count: self.samples.len(),
            }];
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for sample in &self.samples {
            let index = (((sample - min) / width).floor() as usize).min(bin_count - 1);
            bins[index].count += 1;
        }
        bins
    }

    /// One row per pair: `date`, `matched_date`, `start_value`, `end_value`, `growth`.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let day = |date: chrono::NaiveDate| date.format("%Y-%m-%d").to_string();

        DataFrame::new(vec![
            Series::new("date", self.pairs.iter().map(|p| day(p.date)).collect::<Vec<_>>()),
            Series::new(
                "matched_date",
                self.pairs.iter().map(|p| day(p.matched_date)).collect::<Vec<_>>(),
            ),
            Series::new("start_value", self.pairs.iter().map(|p| p.start_value).collect::<Vec<_>>()),
            Series::new("end_value", self.pairs.iter().map(|p| p.end_value).collect::<Vec<_>>()),
            Series::new("growth", self.samples.clone()),
        ])
    }
}

fn bounds(samples: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), sample| {
            (lo.min(*sample), hi.max(*sample))
        })
}
