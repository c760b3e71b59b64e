// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{series, Ema, Indicator};
use crate::outcome::Outcome;
use serde_json::Value;
use shared::models::MacdValues;

pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }

    /// Elementwise fast EMA minus slow EMA over their common tail.
    fn macd_line(&self, prices: &[f64]) -> Outcome<Vec<f64>> {
        let ema_fast = match Ema::new(self.fast).calculate(prices) {
            Outcome::Value(series) => series,
            other => return other,
        };

        Ema::new(self.slow).calculate(prices).map(|ema_slow| {
            // Both series end at the last price, so trimming the longer one from
            // the front lines them up.
            let overlap = ema_fast.len().min(ema_slow.len());
            let fast_aligned = &ema_fast[ema_fast.len() - overlap..];
            let slow_aligned = &ema_slow[ema_slow.len() - overlap..];
            fast_aligned.iter().zip(slow_aligned).map(|(f, s)| f - s).collect()
        })
    }
}

impl Indicator for Macd {
    type Output = MacdValues;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, prices: &[f64]) -> Outcome<MacdValues> {
        let required = self.slow + self.signal;
        if prices.len() < required {
            return Outcome::insufficient(required, prices.len());
        }

        let Outcome::Value(macd_line) = self.macd_line(prices) else {
            return Outcome::insufficient(required, prices.len());
        };
        let Some(&macd) = macd_line.last() else {
            return Outcome::insufficient(required, prices.len());
        };

        // Signal line is the EMA of the whole MACD line, not a trailing window.
        let signal_line = series::ema(&macd_line, self.signal);
        let Some(&signal) = signal_line.last() else {
            // Degraded but defined: no signal line, histogram equals the MACD value.
            return Outcome::Value(MacdValues { macd, signal: 0.0, histogram: macd });
        };

        Outcome::Value(MacdValues {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}
