// src/time_offset.rs

use chrono::Duration;
use std::fmt;

use crate::config::SECONDS_PER_YEAR;

/// Holding period used both to look ahead in a series and to annualize growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOffset(Duration);

impl TimeOffset {
    pub fn new(duration: Duration) -> Self {
        TimeOffset(duration)
    }

    /// Panics when the length does not fit a `Duration`; see [`try_days`](Self::try_days).
    pub fn days(days: i64) -> Self {
        TimeOffset(Duration::days(days))
    }

    pub fn try_days(days: i64) -> Option<Self> {
        Duration::try_days(days).map(TimeOffset)
    }

    pub fn weeks(weeks: i64) -> Self {
        TimeOffset(Duration::weeks(weeks))
    }

    /// `years` periods of 365 days.
    ///
    /// Panics when the length does not fit a `Duration`; see [`try_years`](Self::try_years).
    pub fn years(years: i64) -> Self {
        TimeOffset(Duration::days(365 * years))
    }

    pub fn try_years(years: i64) -> Option<Self> {
        years.checked_mul(365).and_then(Self::try_days)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn in_years(&self) -> f64 {
        self.0.num_seconds() as f64 / SECONDS_PER_YEAR
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Duration::zero()
    }
}

impl From<Duration> for TimeOffset {
    fn from(duration: Duration) -> Self {
        TimeOffset(duration)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0.num_days();
        if self.0 == Duration::days(days) {
            if days != 0 && days % 365 == 0 {
                write!(f, "{}y", days / 365)
            } else {
                write!(f, "{}d", days)
            }
        } else {
            write!(f, "{}s", self.0.num_seconds())
        }
    }
}
