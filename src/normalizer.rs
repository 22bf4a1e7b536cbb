// src/normalizer.rs

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::daily_series::NormalizedSeries;
use crate::error::{Result, RiskError};
use crate::raw_series::{RawSeries, CLOSE_KEY};

/// Turns a provider series into a dense, chronological, strictly positive one.
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    /// Parses, drops unusable prices and fills every missing calendar day.
    ///
    /// A close that is not a finite price above zero is discarded, whether it
    /// is unparseable text (`"n/a"`), `null`, `"NaN"` or `"0"`. Only structural
    /// faults are errors: a missing time-series object, an unparseable date,
    /// a record without a close field, or a series with no usable price left.
    ///
    /// A day without an observation takes the price of the nearest observed
    /// day. When the previous and the next observation are equally far away
    /// the earlier one wins.
    pub fn normalize(raw: &RawSeries) -> Result<NormalizedSeries> {
        let observations = Self::parse_observations(raw)?;
        let parsed = observations.len();

        let retained = Self::discard_invalid(observations);
        if retained.len() < parsed {
            debug!(dropped = parsed - retained.len(), "discarded unusable closing prices");
        }

        if retained.is_empty() {
            return Err(RiskError::data_format("no positive closing prices in series"));
        }

        Ok(Self::fill_daily(&retained))
    }

    /// Chronologically sorted observations; a date seen twice keeps its last record.
    fn parse_observations(raw: &RawSeries) -> Result<Vec<(NaiveDate, Option<f64>)>> {
        let mut observations = raw
            .daily_entries()?
            .iter()
            .map(|(date, record)| -> Result<(NaiveDate, Option<f64>)> {
                Ok((parse_date(date)?, parse_close(date, record)?))
            })
            .collect::<Result<Vec<_>>>()?;

        observations.sort_by_key(|(date, _)| *date);

        let mut unique: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(observations.len());
        for (date, close) in observations {
            match unique.last_mut() {
                Some(last) if last.0 == date => last.1 = close,
                _ => unique.push((date, close)),
            }
        }
        Ok(unique)
    }

    fn discard_invalid(observations: Vec<(NaiveDate, Option<f64>)>) -> Vec<(NaiveDate, f64)> {
        observations
            .into_iter()
            .filter_map(|(date, close)| close.filter(|c| c.is_finite() && *c > 0.0).map(|c| (date, c)))
            .collect()
    }

    fn fill_daily(observed: &[(NaiveDate, f64)]) -> NormalizedSeries {
        let (first, _) = observed[0];
        let (last, _) = observed[observed.len() - 1];

        let mut prices = Vec::with_capacity((last - first).num_days() as usize + 1);
        let mut next = 0;

        for day in first.iter_days().take_while(|day| *day <= last) {
            while observed[next].0 < day {
                next += 1;
            }

            let (next_date, next_close) = observed[next];
            if next_date == day {
                prices.push(next_close);
                continue;
            }

            // `day` lies strictly between two observations.
            let (prev_date, prev_close) = observed[next - 1];
            if day - prev_date <= next_date - day {
                prices.push(prev_close);
            } else {
                prices.push(next_close);
            }
        }

        NormalizedSeries::from_dense(first, prices)
    }
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    let day = date.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| RiskError::data_format(format!("invalid date {date:?}: {e}")))
}

/// `None` when the close is present but not a number.
fn parse_close(date: &str, record: &Value) -> Result<Option<f64>> {
    let close = record
        .get(CLOSE_KEY)
        .ok_or_else(|| RiskError::data_format(format!("{date}: missing {CLOSE_KEY:?} field")))?;

    Ok(match close {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    })
}
