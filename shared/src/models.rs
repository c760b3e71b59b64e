use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One OHLCV bar. `timestamp` is epoch milliseconds.
///
/// Deserializes from an object or from the exchange's positional form
/// `[timestamp, open, high, low, close, volume]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<(i64, f64, f64, f64, f64, f64)> for Candle {
    fn from((timestamp, open, high, low, close, volume): (i64, f64, f64, f64, f64, f64)) -> Self {
        Candle { timestamp, open, high, low, close, volume }
    }
}

/// Close prices of a series, in order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 10] = [
        TimeFrame::Minute1,
        TimeFrame::Minute3,
        TimeFrame::Minute5,
        TimeFrame::Minute15,
        TimeFrame::Minute30,
        TimeFrame::Hour1,
        TimeFrame::Hour4,
        TimeFrame::Day1,
        TimeFrame::Week1,
        TimeFrame::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute3 => "3m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Hour4 => "4h",
            TimeFrame::Day1 => "1d",
            TimeFrame::Week1 => "1w",
            TimeFrame::Month1 => "1M",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = anyhow::Error;

    // Case-sensitive: "1m" is one minute, "1M" is one month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFrame::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unsupported timeframe '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Per-factor scores and their weighted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rsi_score: f64,
    pub macd_score: f64,
    pub price_score: f64,
    pub volume_score: f64,
    pub ma_score: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::StrongBuy => "STRONG_BUY",
            Signal::Buy => "BUY",
            Signal::Neutral => "NEUTRAL",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG_SELL",
        };
        f.write_str(label)
    }
}

/// Result of analysing one symbol on one timeframe. This is the shape the
/// dashboard and the storage layer read, so field names are part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub current_price: f64,
    #[serde(alias = "price_change")]
    pub price_change_pct: f64,
    pub rsi: f64,
    pub macd: MacdValues,
    pub ma: f64,
    pub ma_signal: i8,
    pub volume: f64,
    pub volume_ma: f64,
    pub volume_ratio: f64,
    pub score: ScoreBreakdown,
    pub signal: Signal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSymbol {
    pub symbol: String,
    pub volume_24h: f64,
    pub timeframes: BTreeMap<TimeFrame, AnalysisRecord>,
    pub avg_score: f64,
}

/// Exchange instrument metadata. A missing status is treated as tradable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    #[serde(default, rename = "turnover24h", alias = "turnover_24h")]
    pub turnover_24h: Option<f64>,
    #[serde(default, rename = "volume24h", alias = "volume_24h")]
    pub volume_24h: Option<f64>,
}

impl Ticker {
    /// 24h quote volume: turnover if reported, else raw volume, else 0.
    pub fn quote_volume(&self) -> f64 {
        self.turnover_24h.or(self.volume_24h).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: f64,
    pub volume: f64,
    pub timestamp: i64,
}

/// Live metrics of a DEX token as reported by the discovery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub address: String,
    pub symbol: String,
    #[serde(default)]
    pub chain_id: String,
    pub price_usd: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub liquidity: f64,
    pub pair_created_at: DateTime<Utc>,
}

impl TokenSnapshot {
    pub fn pair_age(&self, now: DateTime<Utc>) -> Duration {
        now - self.pair_created_at
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    pub is_pump: bool,
    pub is_dump: bool,
    pub is_shadow_pump: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistDecision {
    pub is_blacklisted: bool,
    pub reason: String,
}

impl BlacklistDecision {
    pub fn blacklist(reason: impl Into<String>) -> Self {
        BlacklistDecision { is_blacklisted: true, reason: reason.into() }
    }
}

/// Token safety report from the rug-check service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub is_rug: bool,
    pub risk_level: String,
    #[serde(default)]
    pub honeypot: bool,
    #[serde(default)]
    pub mintable: bool,
    #[serde(default)]
    pub proxy: bool,
    #[serde(default)]
    pub holder_count: u64,
    #[serde(default)]
    pub liquidity_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SafetyReport {
    /// Report used when the check itself could not be performed: assume unsafe.
    pub fn check_failed(error: impl Into<String>) -> Self {
        SafetyReport {
            is_rug: true,
            risk_level: "UNKNOWN".to_string(),
            honeypot: false,
            mintable: false,
            proxy: false,
            holder_count: 0,
            liquidity_locked: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub id: Uuid,
    pub symbol: String,
    pub direction: TradeDirection,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
