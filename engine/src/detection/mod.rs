// Heuristics over short price histories and live token metrics. Fixed
// thresholds that gate tokens out rather than score them.

pub mod pattern;
pub mod trade_signal;

pub use pattern::PatternDetector;
pub use trade_signal::{TradeSettings, TradeSignalPolicy};
