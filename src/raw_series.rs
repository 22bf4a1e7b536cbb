// src/raw_series.rs

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, RiskError};

pub const TIME_SERIES_KEY: &str = "Time Series (Daily)";
pub const META_DATA_KEY: &str = "Meta Data";
pub const CLOSE_KEY: &str = "4. close";

/// Top-level keys that mark a response as an error payload rather than data.
pub const ERROR_KEYS: [&str; 3] = ["Error Message", "Information", "Note"];

/// Daily series exactly as delivered by the provider.
///
/// Dates map to records holding at least a `"4. close"` field, in whatever
/// order and with whatever gaps the provider produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    payload: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesMeta {
    pub symbol: Option<String>,
    pub last_refreshed: Option<String>,
    pub time_zone: Option<Tz>,
}

#[derive(Debug, Default, Deserialize)]
struct MetaRecord {
    #[serde(rename = "2. Symbol")]
    symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: Option<String>,
    #[serde(rename = "5. Time Zone")]
    time_zone: Option<String>,
}

impl RawSeries {
    pub fn from_json(payload: Value) -> Self {
        RawSeries { payload }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(RawSeries::from_json(serde_json::from_str(text)?))
    }

    /// Builds a provider-shaped payload from `(date, close)` observations.
    pub fn from_closes<I>(closes: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let series: Map<String, Value> = closes
            .into_iter()
            .map(|(date, close)| {
                let mut record = Map::new();
                record.insert(CLOSE_KEY.to_string(), Value::String(close.to_string()));
                (date.format("%Y-%m-%d").to_string(), Value::Object(record))
            })
            .collect();

        let mut payload = Map::new();
        payload.insert(TIME_SERIES_KEY.to_string(), Value::Object(series));
        RawSeries::from_json(Value::Object(payload))
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.payload)?)
    }

    /// Message of the first error-indicator key present, if any.
    pub fn error_message(&self) -> Option<String> {
        ERROR_KEYS.iter().find_map(|key| {
            self.payload.get(*key).map(|value| match value {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })
        })
    }

    pub fn is_error_payload(&self) -> bool {
        self.error_message().is_some()
    }

    /// Passes the series through, or raises a provider error for an error payload.
    pub fn ensure_valid(self, symbol: &str) -> Result<Self> {
        match self.error_message() {
            Some(message) => Err(RiskError::provider(symbol, message)),
            None => Ok(self),
        }
    }

    pub fn daily_entries(&self) -> Result<&Map<String, Value>> {
        self.payload
            .get(TIME_SERIES_KEY)
            .ok_or_else(|| RiskError::data_format(format!("missing {TIME_SERIES_KEY:?} key")))?
            .as_object()
            .ok_or_else(|| RiskError::data_format(format!("{TIME_SERIES_KEY:?} is not an object")))
    }

    pub fn meta(&self) -> SeriesMeta {
        let record = self
            .payload
            .get(META_DATA_KEY)
            .and_then(|value| MetaRecord::deserialize(value).ok())
            .unwrap_or_default();

        SeriesMeta {
            symbol: record.symbol,
            last_refreshed: record.last_refreshed,
            time_zone: record.time_zone.and_then(|tz| tz.parse::<Tz>().ok()),
        }
    }
}
