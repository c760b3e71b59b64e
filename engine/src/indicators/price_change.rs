// Percentage price change over N bars.
use super::{series, Indicator};
use crate::outcome::Outcome;
use serde_json::Value;

pub struct PriceChange {
    name: String,
    periods: usize,
}

impl PriceChange {
    pub fn new(periods: usize) -> Self {
        Self {
            name: format!("PriceChange({})", periods),
            periods,
        }
    }
}

impl Indicator for PriceChange {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "periods": self.periods })
    }

    /// `(last - reference) / reference * 100` where the reference is `periods`
    /// bars back. A zero reference price yields `0.0`.
    fn calculate(&self, prices: &[f64]) -> Outcome<f64> {
        let required = self.periods + 1;
        if prices.len() < required {
            return Outcome::insufficient(required, prices.len());
        }
        let latest = prices[prices.len() - 1];
        let reference = prices[prices.len() - 1 - self.periods];
        Outcome::Value(series::pct_change(reference, latest))
    }
}
