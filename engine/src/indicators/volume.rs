// Volume ratio: current bar volume against its moving average.
use super::series;

pub const NEUTRAL_VOLUME_RATIO: f64 = 1.0;

/// `current / avg`, or exactly `1.0` when the average is zero.
pub fn volume_ratio(current: f64, avg: f64) -> f64 {
    series::safe_ratio(current, avg, NEUTRAL_VOLUME_RATIO)
}
