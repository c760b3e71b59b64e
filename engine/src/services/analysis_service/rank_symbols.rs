// Handler for the multi-symbol ranking.
use super::helpers::{average_score, sort_ranked};
use super::universe::{select_universe, UniverseEntry};
use super::{AnalysisOrchestrator, Ranking};
use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::services::with_timeout;
use futures::{stream, StreamExt};
use shared::models::RankedSymbol;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

pub async fn handle_rank_symbols(orch: &AnalysisOrchestrator, cancel: &CancellationToken) -> Ranking {
    let universe = match fetch_universe(orch).await {
        Ok(universe) => universe,
        Err(e) => {
            tracing::error!(error_detail = %e, "Failed to load symbol universe, ranking aborted");
            return Ranking::default();
        }
    };

    tracing::info!(
        symbols = universe.len(),
        timeframes = orch.screen.timeframes.len(),
        concurrency = orch.screen.concurrency,
        "Ranking started"
    );

    // Once cancelled, no new symbol is taken; symbols already in flight finish.
    let completed: Vec<(usize, RankedSymbol)> = stream::iter(universe.into_iter().enumerate())
        .take_until(cancel.cancelled())
        .map(|(idx, entry)| async move { evaluate_symbol(orch, entry).await.map(|ranked| (idx, ranked)) })
        .buffer_unordered(orch.screen.concurrency.max(1))
        .filter_map(|ranked| async move { ranked })
        .collect()
        .await;

    let ranking = Ranking { symbols: sort_ranked(completed) };
    if cancel.is_cancelled() {
        tracing::warn!(ranked = ranking.len(), "Ranking cancelled, returning partial result");
    } else {
        tracing::info!(ranked = ranking.len(), "Ranking finished");
    }
    ranking
}

async fn fetch_universe(orch: &AnalysisOrchestrator) -> Result<Vec<UniverseEntry>, EngineError> {
    let timeout = orch.screen.fetch_timeout();
    let instruments = with_timeout("fetch instruments", timeout, orch.source.instruments()).await?;
    let tickers = with_timeout("fetch tickers", timeout, orch.source.tickers()).await?;
    Ok(select_universe(&instruments, &tickers, &orch.screen))
}

// All timeframes of one symbol. Any collaborator failure drops the symbol;
// a timeframe without candles is only skipped.
async fn evaluate_symbol(orch: &AnalysisOrchestrator, entry: UniverseEntry) -> Option<RankedSymbol> {
    let mut timeframes = BTreeMap::new();
    for &timeframe in &orch.screen.timeframes {
        match orch.analyze_symbol(&entry.symbol, timeframe).await {
            Outcome::Value(record) => {
                timeframes.insert(timeframe, record);
            }
            Outcome::InsufficientData { .. } => continue,
            Outcome::ExternalFailure(msg) => {
                tracing::warn!(symbol = %entry.symbol, %timeframe, error_detail = %msg, "Symbol omitted from ranking");
                return None;
            }
        }
    }

    let Some(avg_score) = average_score(timeframes.values()) else {
        tracing::debug!(symbol = %entry.symbol, "No timeframe produced a record");
        return None;
    };

    Some(RankedSymbol { symbol: entry.symbol, volume_24h: entry.volume_24h, timeframes, avg_score })
}
