// Handler for a single (symbol, timeframe) analysis unit.
use super::helpers::build_record;
use super::AnalysisOrchestrator;
use crate::outcome::Outcome;
use crate::scoring::classify;
use crate::services::with_timeout;
use chrono::Utc;
use shared::models::{AnalysisRecord, TimeFrame};

pub async fn handle_analyze_symbol(
    orch: &AnalysisOrchestrator,
    symbol: &str,
    timeframe: TimeFrame,
) -> Outcome<AnalysisRecord> {
    let timeout = orch.screen.fetch_timeout();

    let fetch = orch.source.candles(symbol, timeframe, orch.screen.candle_limit);
    let candles = match with_timeout("fetch candles", timeout, fetch).await {
        Ok(candles) => candles,
        Err(e) => {
            tracing::warn!(symbol = %symbol, %timeframe, error_detail = %e, "Candle fetch failed");
            return Outcome::failure(e);
        }
    };

    let bundle = match orch.indicators.compute(&candles) {
        Outcome::Value(bundle) => bundle,
        Outcome::InsufficientData { required, available } => {
            tracing::debug!(symbol = %symbol, %timeframe, "No candles, skipping timeframe");
            return Outcome::insufficient(required, available);
        }
        Outcome::ExternalFailure(msg) => return Outcome::ExternalFailure(msg),
    };

    let score = orch.scorer.score(&bundle);
    let signal = classify(score.total_score);
    let record = build_record(symbol, timeframe, &bundle, score, signal, Utc::now());

    if let Err(e) = with_timeout("store analysis", timeout, orch.sink.store_analysis(&record)).await {
        tracing::warn!(symbol = %symbol, %timeframe, error_detail = %e, "Failed to store analysis");
        return Outcome::failure(e);
    }

    tracing::debug!(
        symbol = %symbol,
        %timeframe,
        total_score = record.score.total_score,
        signal = %record.signal,
        "Analysis stored"
    );
    Outcome::Value(record)
}
