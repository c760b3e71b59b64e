use shared::models::Signal;

/// Signal label for a total score. Thresholds are strict, checked from the top:
/// exactly `20.0` is `Buy`, exactly `-20.0` is `StrongSell`.
pub fn classify(total_score: f64) -> Signal {
    if total_score > 20.0 {
        Signal::StrongBuy
    } else if total_score > 10.0 {
        Signal::Buy
    } else if total_score > -10.0 {
        Signal::Neutral
    } else if total_score > -20.0 {
        Signal::Sell
    } else {
        Signal::StrongSell
    }
}
