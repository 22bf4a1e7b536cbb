// tests/normalizer_tests.rs
use chrono::{Duration, NaiveDate};
use riskhist::{RawSeries, RiskError, SeriesNormalizer};
use serde_json::json;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
}

#[test]
fn test_normalize_is_idempotent_on_dense_series() {
    let raw = RawSeries::from_closes((0..40).map(|i| (day(i), 50.0 + 0.37 * i as f64)));
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    let again = SeriesNormalizer::normalize(&series.to_raw()).unwrap();

    assert_eq!(again, series);
    assert_eq!(series.len(), 40);
}

#[test]
fn test_gapped_series_is_dense_and_positive() {
    let raw = RawSeries::from_closes(vec![
        (day(0), 10.0),
        (day(3), 20.0),
        (day(4), -5.0),
        (day(9), 30.0),
        (day(17), 0.0),
        (day(20), 40.0),
    ]);
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.start(), day(0));
    assert_eq!(series.end(), day(20));
    assert_eq!(series.len(), 21);

    let dates: Vec<NaiveDate> = series.iter().map(|(date, _)| date).collect();
    assert!(dates.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    assert!(series.prices().iter().all(|price| *price > 0.0));
}

#[test]
fn test_reverse_chronological_source_is_sorted() {
    let raw = RawSeries::parse(
        r#"{
            "Time Series (Daily)": {
                "2020-01-03": {"4. close": "103.0"},
                "2020-01-02": {"4. close": "102.0"},
                "2020-01-01": {"4. close": "101.0"}
            }
        }"#,
    )
    .unwrap();
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.start(), day(0));
    assert_eq!(series.prices(), &[101.0, 102.0, 103.0]);
}

#[test]
fn test_fill_takes_nearest_observation() {
    let raw = RawSeries::from_closes(vec![(day(0), 10.0), (day(3), 20.0)]);
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.prices(), &[10.0, 10.0, 20.0, 20.0]);
}

#[test]
fn test_fill_prefers_earlier_day_on_tie() {
    let raw = RawSeries::from_closes(vec![(day(0), 10.0), (day(2), 20.0), (day(6), 30.0)]);
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.price_on(day(1)), Some(10.0));
    assert_eq!(series.price_on(day(4)), Some(20.0));
    assert_eq!(series.price_on(day(5)), Some(30.0));
}

#[test]
fn test_zero_price_is_filled_from_valid_neighbor() {
    let raw = RawSeries::from_closes(vec![
        (day(0), 100.0),
        (day(1), 101.0),
        (day(2), 0.0),
        (day(3), 104.0),
        (day(4), 105.0),
    ]);
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.len(), 5);
    assert_eq!(series.price_on(day(2)), Some(101.0));
}

#[test]
fn test_missing_time_series_key_is_data_format_error() {
    let raw = RawSeries::from_json(json!({"Meta Data": {"2. Symbol": "IBM"}}));

    let result = SeriesNormalizer::normalize(&raw);

    assert!(matches!(result, Err(RiskError::DataFormat(_))));
}

#[test]
fn test_no_positive_prices_is_data_format_error() {
    let raw = RawSeries::from_closes(vec![(day(0), 0.0), (day(1), -1.0)]);

    let result = SeriesNormalizer::normalize(&raw);

    assert!(matches!(result, Err(RiskError::DataFormat(_))));
}

#[test]
fn test_unusable_closes_are_discarded_alike() {
    let raw = RawSeries::from_json(json!({
        "Time Series (Daily)": {
            "2020-01-01": {"4. close": "10.0"},
            "2020-01-02": {"4. close": "NaN"},
            "2020-01-03": {"4. close": "n/a"},
            "2020-01-04": {"4. close": null},
            "2020-01-05": {"4. close": "14.0"}
        }
    }));

    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.len(), 5);
    assert_eq!(series.price_on(day(1)), Some(10.0));
    assert_eq!(series.price_on(day(2)), Some(10.0));
    assert_eq!(series.price_on(day(3)), Some(14.0));
    assert!(series.prices().iter().all(|p| p.is_finite() && *p > 0.0));
}

#[test]
fn test_only_unusable_closes_is_data_format_error() {
    let raw = RawSeries::from_json(json!({
        "Time Series (Daily)": {
            "2020-01-01": {"4. close": "NaN"},
            "2020-01-02": {"4. close": "n/a"}
        }
    }));

    assert!(matches!(SeriesNormalizer::normalize(&raw), Err(RiskError::DataFormat(_))));
}

#[test]
fn test_missing_close_field_is_data_format_error() {
    let raw = RawSeries::from_json(json!({
        "Time Series (Daily)": {
            "2020-01-01": {"1. open": "10.0"}
        }
    }));

    assert!(matches!(SeriesNormalizer::normalize(&raw), Err(RiskError::DataFormat(_))));
}

#[test]
fn test_numeric_close_and_timestamped_keys_are_accepted() {
    let raw = RawSeries::from_json(json!({
        "Time Series (Daily)": {
            "2020-01-01 16:00:00": {"4. close": 12.5},
            "2020-01-02 16:00:00": {"4. close": "13.5"}
        }
    }));
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    assert_eq!(series.prices(), &[12.5, 13.5]);
}

#[test]
fn test_meta_data_is_exposed() {
    let raw = RawSeries::from_json(json!({
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-05-03",
            "4. Output Size": "Full size",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2024-05-03": {"4. close": "165.7100"}
        }
    }));
    let meta = raw.meta();

    assert_eq!(meta.symbol.as_deref(), Some("IBM"));
    assert_eq!(meta.last_refreshed.as_deref(), Some("2024-05-03"));
    assert_eq!(meta.time_zone, Some(chrono_tz::US::Eastern));
}

#[test]
fn test_series_to_dataframe() {
    let raw = RawSeries::from_closes(vec![(day(0), 10.0), (day(4), 14.0)]);
    let series = SeriesNormalizer::normalize(&raw).unwrap();

    let df = series.to_dataframe().unwrap();

    assert_eq!(df.height(), 5);
    let dates = df.column("date").unwrap().str().unwrap();
    assert_eq!(dates.get(0), Some("2020-01-01"));
    assert_eq!(dates.get(4), Some("2020-01-05"));
    let closes = df.column("close").unwrap().f64().unwrap();
    assert_eq!(closes.get(2), Some(10.0));
    assert_eq!(closes.get(3), Some(14.0));
}
