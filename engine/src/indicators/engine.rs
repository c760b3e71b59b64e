// Composes the fixed indicator set over one candle series.
use super::rsi::NEUTRAL_RSI;
use super::{ma_signal, volume_ratio, Indicator, Macd, PriceChange, Rsi, Sma};
use crate::error::EngineError;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use shared::models::{closes, volumes, Candle, MacdValues};

/// Periods for the indicator set. Validated once at configuration load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub ma_period: usize,
    pub volume_ma_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ma_period: 20,
            volume_ma_period: 20,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("ma_period", self.ma_period),
            ("volume_ma_period", self.volume_ma_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p < 1) {
            return Err(EngineError::ConfigError(format!("{} must be at least 1", name)));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::ConfigError(format!(
                "macd_fast ({}) must be smaller than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

/// Indicator snapshot for the latest bar of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorBundle {
    pub current_price: f64,
    pub volume: f64,
    pub rsi: f64,
    pub macd: MacdValues,
    pub ma: f64,
    pub ma_signal: i8,
    pub volume_ma: f64,
    pub volume_ratio: f64,
    pub price_change_pct: f64,
}

pub struct IndicatorEngine {
    rsi: Rsi,
    macd: Macd,
    ma: Sma,
    volume_ma: Sma,
    price_change: PriceChange,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        IndicatorEngine {
            rsi: Rsi::new(params.rsi_period),
            macd: Macd::new(params.macd_fast, params.macd_slow, params.macd_signal),
            ma: Sma::new(params.ma_period),
            volume_ma: Sma::named("VolumeMA", params.volume_ma_period),
            price_change: PriceChange::new(1),
        }
    }

    /// Runs every indicator over `candles`. Short histories resolve to the
    /// documented neutral values; only an empty series has no bundle at all.
    pub fn compute(&self, candles: &[Candle]) -> Outcome<IndicatorBundle> {
        let Some(latest) = candles.last() else {
            return Outcome::insufficient(1, 0);
        };

        let prices = closes(candles);
        let vols = volumes(candles);

        let rsi = resolve(&self.rsi, &prices, NEUTRAL_RSI);
        let macd = resolve(&self.macd, &prices, MacdValues::default());
        let ma = resolve(&self.ma, &prices, 0.0);
        let volume_ma = resolve(&self.volume_ma, &vols, 0.0);
        let price_change_pct = resolve(&self.price_change, &prices, 0.0);

        Outcome::Value(IndicatorBundle {
            current_price: latest.close,
            volume: latest.volume,
            rsi,
            macd,
            ma,
            ma_signal: ma_signal(latest.close, ma),
            volume_ma,
            volume_ratio: volume_ratio(latest.volume, volume_ma),
            price_change_pct,
        })
    }
}

fn resolve<I: Indicator>(indicator: &I, values: &[f64], fallback: I::Output) -> I::Output {
    match indicator.calculate(values) {
        Outcome::Value(v) => v,
        Outcome::InsufficientData { required, available } => {
            tracing::debug!(
                indicator = indicator.name(),
                parameters = %indicator.parameters(),
                required,
                available,
                "Insufficient history, using neutral fallback"
            );
            fallback
        }
        Outcome::ExternalFailure(msg) => {
            tracing::warn!(indicator = indicator.name(), error_detail = %msg, "Indicator failed, using neutral fallback");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles_from(prices: &[f64], volume: f64) -> Vec<Candle> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Candle {
                timestamp: 1_700_000_000_000 + i as i64 * 60_000,
                open: p,
                high: p,
                low: p,
                close: p,
                volume,
            })
            .collect()
    }

    #[test]
    fn test_params_validation() {
        assert!(IndicatorParams::default().validate().is_ok());
        let inverted = IndicatorParams { macd_fast: 26, macd_slow: 12, ..Default::default() };
        assert!(matches!(inverted.validate(), Err(EngineError::ConfigError(_))));
        let zero = IndicatorParams { rsi_period: 0, ..Default::default() };
        assert!(zero.validate().unwrap_err().to_string().contains("rsi_period"));
    }

    #[test]
    fn test_empty_series_has_no_bundle() {
        let engine = IndicatorEngine::new(IndicatorParams::default());
        assert_eq!(engine.compute(&[]), Outcome::InsufficientData { required: 1, available: 0 });
    }

    #[test]
    fn test_single_candle_uses_fallbacks() {
        let engine = IndicatorEngine::new(IndicatorParams::default());
        let bundle = engine.compute(&candles_from(&[42.0], 10.0)).value().unwrap();
        assert_eq!(bundle.rsi, 50.0);
        assert_eq!(bundle.macd, MacdValues::default());
        assert_eq!(bundle.ma, 42.0);
        assert_eq!(bundle.ma_signal, 0);
        assert_eq!(bundle.volume_ma, 10.0);
        assert_eq!(bundle.volume_ratio, 1.0);
        assert_eq!(bundle.price_change_pct, 0.0);
    }

    #[test]
    fn test_rising_series_bundle() {
        let prices: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        let engine = IndicatorEngine::new(IndicatorParams::default());
        let bundle = engine.compute(&candles_from(&prices, 100.0)).value().unwrap();

        assert_eq!(bundle.current_price, 60.0);
        assert_eq!(bundle.rsi, 100.0);
        // MA(20) of 41..=60 is 50.5; 60 is well above the 2% band.
        assert!((bundle.ma - 50.5).abs() < 1e-9);
        assert_eq!(bundle.ma_signal, 1);
        assert!(bundle.macd.macd > 0.0);
        assert_eq!(bundle.volume_ratio, 1.0);
        assert!((bundle.price_change_pct - (1.0 / 59.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_volume_history_is_neutral_ratio() {
        let engine = IndicatorEngine::new(IndicatorParams::default());
        let bundle = engine.compute(&candles_from(&[1.0, 2.0, 3.0], 0.0)).value().unwrap();
        assert_eq!(bundle.volume_ma, 0.0);
        assert_eq!(bundle.volume_ratio, 1.0);
    }
}
