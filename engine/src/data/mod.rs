// Boundaries to the systems this engine does not own: exchange market data,
// analysis persistence, token price history, the rug-check service and the
// blacklist. The submodules hold the local implementations.

pub mod analysis_sink;
pub mod blacklist;
pub mod csv_parser;
pub mod market_data;
pub mod price_history;

use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::{AnalysisRecord, Candle, Instrument, PriceSample, SafetyReport, Ticker, TimeFrame};

pub use analysis_sink::{JsonlAnalysisSink, MemoryAnalysisSink};
pub use blacklist::MemoryBlacklist;
pub use csv_parser::CsvCandleLoader;
pub use market_data::MarketDataStore;
pub use price_history::MemoryPriceHistory;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn instruments(&self) -> Result<Vec<Instrument>, EngineError>;

    async fn tickers(&self) -> Result<Vec<Ticker>, EngineError>;

    /// The most recent `limit` candles, ascending by timestamp. An unknown
    /// symbol/timeframe yields an empty series, not an error.
    async fn candles(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Result<Vec<Candle>, EngineError>;
}

#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn store_analysis(&self, record: &AnalysisRecord) -> Result<(), EngineError>;
}

/// Per-token price samples, appended by whoever observes prices.
#[async_trait]
pub trait PriceHistory: Send + Sync {
    /// Samples with `timestamp >= since_ms`, ascending.
    async fn price_window(&self, token: &str, since_ms: i64) -> Result<Vec<PriceSample>, EngineError>;

    async fn record_price(&self, token: &str, sample: PriceSample) -> Result<(), EngineError>;
}

#[async_trait]
pub trait SafetyChecker: Send + Sync {
    async fn check_token(&self, address: &str, chain: &str) -> Result<SafetyReport, EngineError>;
}

#[async_trait]
pub trait Blacklist: Send + Sync {
    async fn is_blacklisted(&self, address: &str) -> Result<bool, EngineError>;

    async fn add_to_blacklist(&self, address: &str, reason: &str) -> Result<(), EngineError>;
}
