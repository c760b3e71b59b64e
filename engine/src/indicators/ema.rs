// Exponential Moving Average (EMA) indicator implementation
use super::{series, Indicator};
use crate::outcome::Outcome;
use serde_json::Value;

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl Indicator for Ema {
    // Tail-aligned EMA series, see `series::ema`.
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, values: &[f64]) -> Outcome<Vec<f64>> {
        if self.period == 0 || values.len() < self.period {
            return Outcome::insufficient(self.period.max(1), values.len());
        }
        Outcome::Value(series::ema(values, self.period))
    }
}
