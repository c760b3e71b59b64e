// Simple Moving Average (SMA) indicator implementation
use super::{series, Indicator};
use crate::outcome::Outcome;
use serde_json::Value;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self::named("MA", period)
    }

    /// Same calculation under another label, e.g. "VolumeMA".
    pub fn named(label: &str, period: usize) -> Self {
        Self {
            name: format!("{}({})", label, period),
            period,
        }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    // A short but non-empty history still has a mean, so only empty input is
    // reported as insufficient.
    fn calculate(&self, values: &[f64]) -> Outcome<f64> {
        if values.is_empty() {
            return Outcome::insufficient(1, 0);
        }
        Outcome::Value(series::sma(values, self.period))
    }
}

/// Position of the latest close relative to the MA with a 2% deadband:
/// `1` above `ma * 1.02`, `-1` below `ma * 0.98`, otherwise `0`.
pub fn ma_signal(close: f64, ma: f64) -> i8 {
    if close > ma * 1.02 {
        1
    } else if close < ma * 0.98 {
        -1
    } else {
        0
    }
}
