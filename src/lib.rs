// src/lib.rs

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod provider;
pub mod raw_series;

pub mod daily_series;
pub mod normalizer;
pub mod time_offset;
pub mod aligner;
pub mod growth;
pub mod histogram;
mod histogram_manager;
mod histogram_manager_pool;

pub use config::ProviderConfig;
pub use error::{Result, RiskError};
pub use session::{AlphaVantageSession, RateLimiter};
pub use provider::{AlphaVantageProvider, SeriesProvider};
pub use raw_series::{RawSeries, SeriesMeta};

pub use daily_series::NormalizedSeries;
pub use normalizer::SeriesNormalizer;
pub use time_offset::TimeOffset;
pub use aligner::{PairAligner, ValuePair};
pub use growth::GrowthCalculator;
pub use histogram::{Histogram, HistogramBin, HistogramSummary, InsufficientSpan};
pub use histogram_manager::{histograms_from_series, HistogramManager};
pub use histogram_manager_pool::HistogramManagerPool;
