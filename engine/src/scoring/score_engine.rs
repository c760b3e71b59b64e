use crate::error::EngineError;
use crate::indicators::IndicatorBundle;
use serde::{Deserialize, Serialize};
use shared::models::ScoreBreakdown;

/// Factor weights. Applied as supplied: they are not renormalized to sum to 1,
/// so their sum scales the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSet {
    pub rsi_weight: f64,
    pub macd_weight: f64,
    pub price_weight: f64,
    pub volume_weight: f64,
    pub ma_weight: f64,
}

impl Default for WeightSet {
    fn default() -> Self {
        WeightSet {
            rsi_weight: 0.25,
            macd_weight: 0.25,
            price_weight: 0.25,
            volume_weight: 0.15,
            ma_weight: 0.10,
        }
    }
}

impl WeightSet {
    pub fn validate(&self) -> Result<(), EngineError> {
        let weights = [
            ("rsi_weight", self.rsi_weight),
            ("macd_weight", self.macd_weight),
            ("price_weight", self.price_weight),
            ("volume_weight", self.volume_weight),
            ("ma_weight", self.ma_weight),
        ];
        match weights.iter().find(|(_, w)| !w.is_finite()) {
            Some((name, w)) => Err(EngineError::ConfigError(format!("{} must be finite, got {}", name, w))),
            None => Ok(()),
        }
    }
}

/// Stateless mapping from indicator readings to scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    weights: WeightSet,
}

impl ScoreEngine {
    pub fn new(weights: WeightSet) -> Self {
        ScoreEngine { weights }
    }

    pub fn score(&self, bundle: &IndicatorBundle) -> ScoreBreakdown {
        let rsi_score = rsi_score(bundle.rsi);
        let macd_score = bundle.macd.histogram * 10.0;
        let price_score = bundle.price_change_pct * 2.0;
        let volume_score = volume_score(bundle.volume_ratio);
        let ma_score = f64::from(bundle.ma_signal) * 20.0;

        let w = &self.weights;
        let total_score = rsi_score * w.rsi_weight
            + macd_score * w.macd_weight
            + price_score * w.price_weight
            + volume_score * w.volume_weight
            + ma_score * w.ma_weight;

        ScoreBreakdown {
            rsi_score,
            macd_score,
            price_score,
            volume_score,
            ma_score,
            total_score,
        }
    }
}

// Oversold is bullish (up to +50), overbought bearish (down to -50), 30..=70 neutral.
fn rsi_score(rsi: f64) -> f64 {
    if rsi < 30.0 {
        (30.0 - rsi) / 30.0 * 50.0
    } else if rsi > 70.0 {
        -((rsi - 70.0) / 30.0) * 50.0
    } else {
        0.0
    }
}

fn volume_score(volume_ratio: f64) -> f64 {
    if volume_ratio > 1.5 {
        30.0
    } else if volume_ratio > 1.0 {
        15.0
    } else if volume_ratio > 0.5 {
        0.0
    } else {
        -15.0
    }
}
