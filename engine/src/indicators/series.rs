// Numeric primitives shared by the indicators. None of these fail: short or
// degenerate input resolves to a documented neutral value.

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Simple moving average of the last `period` values.
///
/// With fewer than `period` values the mean of everything available is
/// returned instead; an empty slice yields `0.0`.
pub fn sma(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return mean(values);
    }
    mean(&values[values.len() - period..])
}

/// Exponential moving average seeded with the SMA of the first `period` values.
///
/// The result is aligned to the tail of the input: element 0 corresponds to
/// input index `period - 1`, so its length is `values.len() - period + 1`.
/// Empty when there are fewer than `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut previous = mean(&values[..period]);
    result.push(previous);

    for &value in &values[period..] {
        previous = value * k + previous * (1.0 - k);
        result.push(previous);
    }
    result
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    numerator / denominator
}

/// Percentage change from `from` to `to`; `0.0` when `from` is zero.
pub fn pct_change(from: f64, to: f64) -> f64 {
    safe_ratio(to - from, from, 0.0) * 100.0
}
