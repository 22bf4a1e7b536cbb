// src/growth.rs

use crate::aligner::ValuePair;
use crate::error::{Result, RiskError};
use crate::time_offset::TimeOffset;

/// Converts value pairs into effective annual growth rates.
pub struct GrowthCalculator;

impl GrowthCalculator {
    /// One growth sample per pair, in pair order.
    ///
    /// Fails with [`RiskError::Division`] when the offset is not positive.
    pub fn calculate(pairs: &[ValuePair], offset: &TimeOffset) -> Result<Vec<f64>> {
        let years = offset.in_years();
        if years <= 0.0 {
            return Err(RiskError::Division(format!(
                "holding period {offset} spans {years} years"
            )));
        }

        Ok(pairs
            .iter()
            .map(|pair| annualized_growth(pair.start_value, pair.end_value, years))
            .collect())
    }
}

/// Annual rate that compounds `start_value` into `end_value` over `years`.
pub fn annualized_growth(start_value: f64, end_value: f64, years: f64) -> f64 {
    let relative_growth = end_value / start_value;
    (relative_growth.ln() / years).exp() - 1.0
}
