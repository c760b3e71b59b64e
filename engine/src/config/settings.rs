// Engine settings, loaded from a JSON config file. Every key is optional.
use crate::detection::TradeSettings;
use crate::error::EngineError;
use crate::indicators::IndicatorParams;
use crate::scoring::WeightSet;
use serde::{Deserialize, Serialize};
use shared::models::TimeFrame;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Which symbols are ranked and how the collaborators are called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub timeframes: Vec<TimeFrame>,
    pub min_volume: f64,
    pub max_symbols: usize,
    pub quote_asset: String,
    pub candle_limit: usize,
    pub concurrency: usize,
    pub fetch_timeout_ms: u64,
    pub min_volume_ratio: f64,
    pub min_score: f64,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        ScreenSettings {
            timeframes: vec![TimeFrame::Minute15, TimeFrame::Minute1, TimeFrame::Day1],
            min_volume: 1_000_000.0,
            max_symbols: 100,
            quote_asset: "USDT".to_string(),
            candle_limit: 500,
            concurrency: 8,
            fetch_timeout_ms: 15_000,
            min_volume_ratio: 1.0,
            min_score: 0.0,
        }
    }
}

impl ScreenSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// One week; the price history is a short-term window.
pub const MAX_PRICE_WINDOW_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub price_window_minutes: i64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        DetectorSettings { price_window_minutes: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub indicators: IndicatorParams,
    pub weights: WeightSet,
    pub screen: ScreenSettings,
    pub detector: DetectorSettings,
    pub trading: TradeSettings,
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&content)
            .map_err(|e| EngineError::ConfigError(format!("Invalid config file '{}': {}", path.display(), e)))?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.indicators.validate()?;
        self.weights.validate()?;

        let screen = &self.screen;
        if screen.timeframes.is_empty() {
            return Err(EngineError::ConfigError("screen.timeframes must not be empty".to_string()));
        }
        if screen.concurrency == 0 {
            return Err(EngineError::ConfigError("screen.concurrency must be at least 1".to_string()));
        }
        if screen.candle_limit == 0 {
            return Err(EngineError::ConfigError("screen.candle_limit must be at least 1".to_string()));
        }
        if screen.fetch_timeout_ms == 0 {
            return Err(EngineError::ConfigError("screen.fetch_timeout_ms must be positive".to_string()));
        }
        if screen.quote_asset.trim().is_empty() {
            return Err(EngineError::ConfigError("screen.quote_asset must not be empty".to_string()));
        }
        if !screen.min_volume.is_finite() || !screen.min_score.is_finite() || !screen.min_volume_ratio.is_finite() {
            return Err(EngineError::ConfigError("screen thresholds must be finite".to_string()));
        }
        if !(1..=MAX_PRICE_WINDOW_MINUTES).contains(&self.detector.price_window_minutes) {
            return Err(EngineError::ConfigError(format!(
                "detector.price_window_minutes must be within [1, {}], got {}",
                MAX_PRICE_WINDOW_MINUTES, self.detector.price_window_minutes
            )));
        }

        let trading = &self.trading;
        if !(0.0..=1.0).contains(&trading.min_confidence) {
            return Err(EngineError::ConfigError(format!(
                "trading.min_confidence must be within [0, 1], got {}",
                trading.min_confidence
            )));
        }
        if !(trading.stop_loss_percent >= 0.0 && trading.take_profit_percent >= 0.0) {
            return Err(EngineError::ConfigError("trading stop/take-profit percentages must be non-negative".to_string()));
        }
        Ok(())
    }
}
