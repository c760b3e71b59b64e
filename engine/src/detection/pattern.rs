use crate::indicators::series;
use shared::models::{PatternFlags, PriceSample, TokenSnapshot};

/// Samples needed for the pump and dump checks.
pub const SHORT_WINDOW: usize = 10;
/// Samples needed for the shadow-pump check.
pub const LONG_WINDOW: usize = 20;

const MOVE_THRESHOLD_PCT: f64 = 15.0;
const PUMP_MIN_VOLUME_24H: f64 = 100_000.0;
const PUMP_MIN_CHANGE_24H: f64 = 20.0;
const DUMP_MAX_CHANGE_24H: f64 = -20.0;

const SHADOW_VOLUME_TO_LIQUIDITY: f64 = 10.0;
const SHADOW_THIN_LIQUIDITY: f64 = 50_000.0;
const SHADOW_VOLATILITY_PCT: f64 = 5.0;
const SHADOW_VOLATILE_LIQUIDITY: f64 = 100_000.0;

/// Pump, dump and shadow-pump rules. Holds no state; the price window is
/// read-only and owned by the price-history store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        PatternDetector
    }

    /// Evaluates all three rules. A shadow pump short-circuits the others:
    /// such a token is excluded before pump/dump matter.
    pub fn evaluate(&self, token: &TokenSnapshot, window: &[PriceSample]) -> PatternFlags {
        if self.detect_shadow_pump(token, window) {
            return PatternFlags { is_pump: false, is_dump: false, is_shadow_pump: true };
        }
        PatternFlags {
            is_pump: self.detect_pump(token, window),
            is_dump: self.detect_dump(token, window),
            is_shadow_pump: false,
        }
    }

    /// More than +15% over the last 10 samples, backed by >100k 24h volume and
    /// a >20% 24h change.
    pub fn detect_pump(&self, token: &TokenSnapshot, window: &[PriceSample]) -> bool {
        let Some(change) = short_window_change(window) else {
            return false;
        };
        change > MOVE_THRESHOLD_PCT
            && token.volume_24h > PUMP_MIN_VOLUME_24H
            && token.price_change_24h > PUMP_MIN_CHANGE_24H
    }

    /// More than -15% over the last 10 samples with a 24h change below -20%.
    pub fn detect_dump(&self, token: &TokenSnapshot, window: &[PriceSample]) -> bool {
        let Some(change) = short_window_change(window) else {
            return false;
        };
        change < -MOVE_THRESHOLD_PCT && token.price_change_24h < DUMP_MAX_CHANGE_24H
    }

    /// Volume implausible for the available liquidity, or a choppy last 20
    /// samples on a thin pool.
    pub fn detect_shadow_pump(&self, token: &TokenSnapshot, window: &[PriceSample]) -> bool {
        if window.len() < LONG_WINDOW {
            return false;
        }

        let volume_to_liquidity = series::safe_ratio(token.volume_24h, token.liquidity, 0.0);
        if volume_to_liquidity > SHADOW_VOLUME_TO_LIQUIDITY && token.liquidity < SHADOW_THIN_LIQUIDITY {
            return true;
        }

        average_abs_change(&window[window.len() - LONG_WINDOW..]) > SHADOW_VOLATILITY_PCT
            && token.liquidity < SHADOW_VOLATILE_LIQUIDITY
    }
}

// Percentage change from the first to the last of the most recent 10 samples.
fn short_window_change(window: &[PriceSample]) -> Option<f64> {
    if window.len() < SHORT_WINDOW {
        return None;
    }
    let recent = &window[window.len() - SHORT_WINDOW..];
    Some(series::pct_change(recent[0].price, recent[SHORT_WINDOW - 1].price))
}

// Mean of |Δp / p_prev| * 100 over consecutive samples.
fn average_abs_change(samples: &[PriceSample]) -> f64 {
    let changes: Vec<f64> = samples
        .windows(2)
        .map(|w| series::pct_change(w[0].price, w[1].price).abs())
        .collect();
    series::mean(&changes)
}
