// Helper functions for the analysis_service handlers
use crate::indicators::IndicatorBundle;
use chrono::{DateTime, Utc};
use shared::models::{AnalysisRecord, RankedSymbol, ScoreBreakdown, Signal, TimeFrame};

pub fn build_record(
    symbol: &str,
    timeframe: TimeFrame,
    bundle: &IndicatorBundle,
    score: ScoreBreakdown,
    signal: Signal,
    timestamp: DateTime<Utc>,
) -> AnalysisRecord {
    AnalysisRecord {
        symbol: symbol.to_string(),
        timeframe,
        current_price: bundle.current_price,
        price_change_pct: bundle.price_change_pct,
        rsi: bundle.rsi,
        macd: bundle.macd,
        ma: bundle.ma,
        ma_signal: bundle.ma_signal,
        volume: bundle.volume,
        volume_ma: bundle.volume_ma,
        volume_ratio: bundle.volume_ratio,
        score,
        signal,
        timestamp,
    }
}

/// Mean total score over the records; `None` when there are none.
pub fn average_score<'a>(records: impl IntoIterator<Item = &'a AnalysisRecord>) -> Option<f64> {
    let (sum, count) = records
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), r| (sum + r.score.total_score, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Restores universe order, then stable-sorts by average score descending so
/// equal scores keep that order regardless of completion order.
pub fn sort_ranked(mut ranked: Vec<(usize, RankedSymbol)>) -> Vec<RankedSymbol> {
    ranked.sort_by_key(|(idx, _)| *idx);
    let mut symbols: Vec<RankedSymbol> = ranked.into_iter().map(|(_, s)| s).collect();
    symbols.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    symbols
}
