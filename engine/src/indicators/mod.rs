// Technical indicators module
pub mod ema;
pub mod engine;
pub mod macd;
pub mod price_change;
pub mod rsi;
pub mod series;
pub mod sma;
pub mod volume;

pub use ema::Ema;
pub use engine::{IndicatorBundle, IndicatorEngine, IndicatorParams};
pub use macd::Macd;
pub use price_change::PriceChange;
pub use rsi::Rsi;
pub use sma::{ma_signal, Sma};
pub use volume::volume_ratio;

use crate::outcome::Outcome;
use serde_json::Value;

// Common trait for the fixed indicator set. Each calculation reports
// `InsufficientData` instead of guessing; the engine decides the fallback.
pub trait Indicator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, values: &[f64]) -> Outcome<Self::Output>;
}
