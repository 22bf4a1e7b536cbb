// src/aligner.rs

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::MATCHING_TOLERANCE_DAYS;
use crate::daily_series::NormalizedSeries;
use crate::time_offset::TimeOffset;

/// Price at `date` together with the price observed about one offset later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuePair {
    pub date: NaiveDate,
    pub start_value: f64,
    pub matched_date: NaiveDate,
    pub end_value: f64,
}

/// Pairs every day of a series with the day nearest to it plus an offset.
pub struct PairAligner;

impl PairAligner {
    /// Returns one pair per matchable day, ordered by day.
    ///
    /// A day is matchable when `day + offset` falls inside the series and the
    /// nearest observation is less than [`MATCHING_TOLERANCE_DAYS`] away from
    /// it. Every day is examined; an offset longer than the series yields an
    /// empty result.
    ///
    /// On a dense series the in-span requirement already keeps the nearest day
    /// within half a day of the target, so the tolerance is a bound every pair
    /// satisfies rather than a filter that drops in-span days.
    pub fn align(series: &NormalizedSeries, offset: &TimeOffset) -> Vec<ValuePair> {
        let span = series.span();
        if offset.duration() > span || -offset.duration() > span {
            return Vec::new();
        }

        let tolerance = Duration::days(MATCHING_TOLERANCE_DAYS);
        let first = midnight(series.start());
        let last = midnight(series.end());

        series
            .iter()
            .filter_map(|(date, start_value)| {
                let target = midnight(date).checked_add_signed(offset.duration())?;
                if target < first || target > last {
                    return None;
                }

                let index = Self::nearest_index(series, target);
                let matched_date = series.date_at(index);
                if abs_duration(midnight(matched_date) - target) >= tolerance {
                    return None;
                }

                Some(ValuePair {
                    date,
                    start_value,
                    matched_date,
                    end_value: series.prices()[index],
                })
            })
            .collect()
    }

    /// Index of the day closest to `target`, preferring the earlier day on a tie.
    fn nearest_index(series: &NormalizedSeries, target: NaiveDateTime) -> usize {
        const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

        let seconds = (target - midnight(series.start())).num_seconds().max(0);
        let whole_days = seconds / SECONDS_PER_DAY;
        let remainder = seconds % SECONDS_PER_DAY;

        let index = if 2 * remainder <= SECONDS_PER_DAY {
            whole_days
        } else {
            whole_days + 1
        };
        (index as usize).min(series.len() - 1)
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

fn abs_duration(duration: Duration) -> Duration {
    if duration < Duration::zero() {
        -duration
    } else {
        duration
    }
}
