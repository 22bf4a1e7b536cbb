// src/daily_series.rs

use chrono::{Duration, NaiveDate};
use polars::prelude::*;

use crate::raw_series::RawSeries;

/// Dense daily closing prices: one strictly positive price per calendar day
/// from [`start`](Self::start) to [`end`](Self::end).
///
/// Only [`SeriesNormalizer`](crate::normalizer::SeriesNormalizer) builds these,
/// so the density and positivity invariants hold for every instance.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    start: NaiveDate,
    prices: Vec<f64>,
}

impl NormalizedSeries {
    /// `prices` must be non-empty and strictly positive, one per day from `start`.
    pub(crate) fn from_dense(start: NaiveDate, prices: Vec<f64>) -> Self {
        debug_assert!(!prices.is_empty());
        debug_assert!(prices.iter().all(|price| *price > 0.0));
        NormalizedSeries { start, prices }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.date_at(self.prices.len() - 1)
    }

    pub fn span(&self) -> Duration {
        self.end() - self.start
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Duration::days(index as i64)
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        let index = (date - self.start).num_days();
        usize::try_from(index)
            .ok()
            .and_then(|index| self.prices.get(index).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.start.iter_days().zip(self.prices.iter().copied())
    }

    pub fn to_raw(&self) -> RawSeries {
        RawSeries::from_closes(self.iter())
    }

    /// Two columns: `date` (`YYYY-MM-DD`) and `close`.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let dates: Vec<String> = self
            .iter()
            .map(|(date, _)| date.format("%Y-%m-%d").to_string())
            .collect();

        DataFrame::new(vec![
            Series::new("date", dates),
            Series::new("close", self.prices.clone()),
        ])
    }
}
