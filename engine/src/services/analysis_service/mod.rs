// engine/src/services/analysis_service/mod.rs
// AnalysisOrchestrator: indicator + score pipeline per (symbol, timeframe),
// and the multi-symbol ranking built on top of it.

use crate::config::{EngineSettings, ScreenSettings};
use crate::data::{AnalysisSink, MarketDataSource};
use crate::indicators::IndicatorEngine;
use crate::outcome::Outcome;
use crate::scoring::ScoreEngine;
use serde::{Deserialize, Serialize};
use shared::models::{AnalysisRecord, RankedSymbol, TimeFrame};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod analyze_symbol;
pub mod helpers;
pub mod rank_symbols;
pub mod universe;

pub struct AnalysisOrchestrator {
    source: Arc<dyn MarketDataSource>,
    sink: Arc<dyn AnalysisSink>,
    indicators: IndicatorEngine,
    scorer: ScoreEngine,
    screen: ScreenSettings,
}

impl AnalysisOrchestrator {
    /// `settings` are expected to be validated already (see `EngineSettings::load`).
    pub fn new(settings: &EngineSettings, source: Arc<dyn MarketDataSource>, sink: Arc<dyn AnalysisSink>) -> Self {
        AnalysisOrchestrator {
            source,
            sink,
            indicators: IndicatorEngine::new(settings.indicators),
            scorer: ScoreEngine::new(settings.weights),
            screen: settings.screen.clone(),
        }
    }

    /// Fetches, scores and persists one (symbol, timeframe) unit.
    ///
    /// `InsufficientData` means the source had no candles, which is not an
    /// error. `ExternalFailure` covers fetch or store errors and timeouts.
    pub async fn analyze_symbol(&self, symbol: &str, timeframe: TimeFrame) -> Outcome<AnalysisRecord> {
        analyze_symbol::handle_analyze_symbol(self, symbol, timeframe).await
    }

    /// Ranks the tradable universe by average score across the configured
    /// timeframes. Never fails: collaborator errors shrink the result, and a
    /// failed universe fetch yields an empty ranking.
    pub async fn rank_symbols(&self, cancel: &CancellationToken) -> Ranking {
        rank_symbols::handle_rank_symbols(self, cancel).await
    }
}

/// Ranked symbols, best average score first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    pub symbols: Vec<RankedSymbol>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols scoring at least `min_score` with at least one timeframe whose
    /// volume ratio reaches `min_volume_ratio`. Ranking order is preserved.
    pub fn candidates(&self, min_score: f64, min_volume_ratio: f64) -> Vec<&RankedSymbol> {
        self.symbols
            .iter()
            .filter(|s| s.avg_score >= min_score)
            .filter(|s| s.timeframes.values().any(|r| r.volume_ratio >= min_volume_ratio))
            .collect()
    }
}
