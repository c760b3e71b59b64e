// Relative Strength Index (RSI) indicator implementation
use super::{series, Indicator};
use crate::outcome::Outcome;
use serde_json::Value;

pub const NEUTRAL_RSI: f64 = 50.0;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    /// Plain-average RSI over the last `period` price changes (no Wilder
    /// smoothing). Needs `period + 1` prices.
    fn calculate(&self, prices: &[f64]) -> Outcome<f64> {
        let required = self.period + 1;
        if self.period == 0 || prices.len() < required {
            return Outcome::insufficient(required, prices.len());
        }

        let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let recent = &changes[changes.len() - self.period..];

        let gains: Vec<f64> = recent.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();
        let losses: Vec<f64> = recent.iter().map(|&c| if c < 0.0 { -c } else { 0.0 }).collect(); // losses are positive values

        let avg_gain = series::mean(&gains);
        let avg_loss = series::mean(&losses);

        if avg_loss == 0.0 {
            return Outcome::Value(100.0); // Avoid division by zero; if no losses, RSI is 100
        }

        let rs = avg_gain / avg_loss;
        Outcome::Value(100.0 - (100.0 / (1.0 + rs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_known_series_in_range() {
        let prices = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let rsi = Rsi::new(14).calculate(&prices).value().unwrap();
        assert!(rsi > 0.0 && rsi < 100.0, "RSI out of range: {}", rsi);
    }

    #[test]
    fn test_rsi_uses_only_last_period_changes() {
        // A crash followed by 3 equal rises: the last 3 changes are all gains.
        let prices = [100.0, 50.0, 51.0, 52.0, 53.0];
        assert_eq!(Rsi::new(3).calculate(&prices), Outcome::Value(100.0));
        // Period 4 includes the crash: avg_gain = 0.75, avg_loss = 12.5
        let rsi = Rsi::new(4).calculate(&prices).value().unwrap();
        let expected = 100.0 - 100.0 / (1.0 + 0.75 / 12.5);
        assert!((rsi - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices = vec![1.0; 14]; // needs 15 for period 14
        let outcome = Rsi::new(14).calculate(&prices);
        assert_eq!(outcome, Outcome::InsufficientData { required: 15, available: 14 });
        assert_eq!(outcome.value_or(NEUTRAL_RSI), 50.0);
    }

    #[test]
    fn test_rsi_all_gains() {
        let prices: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        assert_eq!(Rsi::new(14).calculate(&prices), Outcome::Value(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let prices: Vec<f64> = (1..=20).map(|i| 20.0 - i as f64).collect();
        assert_eq!(Rsi::new(14).calculate(&prices), Outcome::Value(0.0));
    }

    #[test]
    fn test_rsi_constant_series_has_no_losses() {
        assert_eq!(Rsi::new(14).calculate(&[5.0; 20]), Outcome::Value(100.0));
    }
}
