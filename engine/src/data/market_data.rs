// Local market data: candles per symbol and timeframe plus exchange metadata.
use super::{CsvCandleLoader, MarketDataSource};
use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::{Candle, Instrument, Ticker, TimeFrame};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const TICKERS_FILE: &str = "tickers.json";

#[derive(Debug, Default)]
pub struct MarketDataStore {
    data: HashMap<String, BTreeMap<TimeFrame, Vec<Candle>>>,
    instruments: Vec<Instrument>,
    tickers: HashMap<String, Ticker>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `new_candles` into the series, keeping it sorted and unique by timestamp.
    pub fn add_candles(&mut self, symbol: &str, timeframe: TimeFrame, new_candles: Vec<Candle>) {
        let timeframe_data = self.data.entry(symbol.to_string()).or_default().entry(timeframe).or_default();
        timeframe_data.extend(new_candles);
        timeframe_data.sort_by_key(|c| c.timestamp);
        timeframe_data.dedup_by_key(|c| c.timestamp);

        if !self.instruments.iter().any(|i| i.symbol == symbol) {
            self.instruments.push(Instrument { symbol: symbol.to_string(), status: Some("Trading".to_string()) });
        }
    }

    /// Registers or replaces instrument metadata (e.g. to mark a symbol as delisted).
    pub fn set_instrument(&mut self, instrument: Instrument) {
        match self.instruments.iter_mut().find(|i| i.symbol == instrument.symbol) {
            Some(existing) => *existing = instrument,
            None => self.instruments.push(instrument),
        }
    }

    pub fn set_ticker(&mut self, ticker: Ticker) {
        self.tickers.insert(ticker.symbol.clone(), ticker);
    }

    pub fn get_candles(&self, symbol: &str, timeframe: TimeFrame) -> Option<&[Candle]> {
        self.data.get(symbol).and_then(|tfs| tfs.get(&timeframe)).map(Vec::as_slice)
    }

    /// Loads every `<SYMBOL>_<timeframe>.csv` in `dir`, plus an optional
    /// `tickers.json` array. Symbols without a ticker get one derived from
    /// their candles.
    pub fn from_csv_dir(dir: &Path) -> Result<Self, EngineError> {
        let mut store = MarketDataStore::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some((symbol, tf)) = stem.rsplit_once('_') else {
                tracing::warn!(file = %path.display(), "Skipping CSV without <SYMBOL>_<timeframe> name");
                continue;
            };
            let timeframe = match tf.parse::<TimeFrame>() {
                Ok(timeframe) => timeframe,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping CSV with unknown timeframe");
                    continue;
                }
            };

            let candles = CsvCandleLoader::load_candles_from_csv(&path)?;
            tracing::debug!(symbol, %timeframe, count = candles.len(), "Loaded candles");
            store.add_candles(symbol, timeframe, candles);
        }

        let tickers_path = dir.join(TICKERS_FILE);
        if tickers_path.exists() {
            let tickers: Vec<Ticker> = serde_json::from_str(&fs::read_to_string(&tickers_path)?)?;
            for ticker in tickers {
                store.set_ticker(ticker);
            }
        }

        store.fill_missing_tickers();
        tracing::info!(symbols = store.data.len(), dir = %dir.display(), "Market data loaded");
        Ok(store)
    }

    fn fill_missing_tickers(&mut self) {
        for (symbol, timeframes) in &self.data {
            if self.tickers.contains_key(symbol) {
                continue;
            }
            let turnover = timeframes.values().next().map(|c| turnover_24h(c)).unwrap_or(0.0);
            self.tickers.insert(
                symbol.clone(),
                Ticker { symbol: symbol.clone(), turnover_24h: Some(turnover), volume_24h: None },
            );
        }
    }
}

// Quote turnover over the day ending at the latest candle.
fn turnover_24h(candles: &[Candle]) -> f64 {
    let Some(latest) = candles.last() else {
        return 0.0;
    };
    candles
        .iter()
        .filter(|c| c.timestamp > latest.timestamp - DAY_MS)
        .map(|c| c.close * c.volume)
        .sum()
}

#[async_trait]
impl MarketDataSource for MarketDataStore {
    async fn instruments(&self) -> Result<Vec<Instrument>, EngineError> {
        Ok(self.instruments.clone())
    }

    async fn tickers(&self) -> Result<Vec<Ticker>, EngineError> {
        let mut tickers: Vec<Ticker> = self.tickers.values().cloned().collect();
        tickers.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(tickers)
    }

    async fn candles(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Result<Vec<Candle>, EngineError> {
        let candles = self.get_candles(symbol, timeframe).unwrap_or(&[]);
        let start = candles.len().saturating_sub(limit);
        Ok(candles[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn candle(timestamp: i64, close: f64, volume: f64) -> Candle {
        Candle { timestamp, open: close, high: close, low: close, close, volume }
    }

    #[test]
    fn test_add_candles_sorts_and_dedups() {
        let mut store = MarketDataStore::new();
        store.add_candles("BTCUSDT", TimeFrame::Minute15, vec![candle(3, 3.0, 1.0), candle(1, 1.0, 1.0)]);
        store.add_candles("BTCUSDT", TimeFrame::Minute15, vec![candle(2, 2.0, 1.0), candle(3, 3.0, 1.0)]);

        let stamps: Vec<i64> = store.get_candles("BTCUSDT", TimeFrame::Minute15).unwrap().iter().map(|c| c.timestamp).collect();
        assert_eq!(stamps, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_candles_returns_latest_limit() {
        let mut store = MarketDataStore::new();
        store.add_candles("ETHUSDT", TimeFrame::Hour1, (0..10).map(|i| candle(i, 1.0 + i as f64, 1.0)).collect());

        let last = store.candles("ETHUSDT", TimeFrame::Hour1, 3).await.unwrap();
        assert_eq!(last.iter().map(|c| c.timestamp).collect::<Vec<_>>(), vec![7, 8, 9]);
        assert!(store.candles("ETHUSDT", TimeFrame::Day1, 3).await.unwrap().is_empty());
        assert!(store.candles("NOPE", TimeFrame::Hour1, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_instrument_overrides_status() {
        let mut store = MarketDataStore::new();
        store.add_candles("XUSDT", TimeFrame::Minute1, vec![candle(1, 1.0, 1.0)]);
        store.set_instrument(Instrument { symbol: "XUSDT".into(), status: Some("Closed".into()) });

        let instruments = store.instruments().await.unwrap();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].status.as_deref(), Some("Closed"));
    }

    #[tokio::test]
    async fn test_from_csv_dir() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("BTCUSDT_15m.csv"),
            "timestamp,open,high,low,close,volume\n0,10,10,10,10,5\n86400000,10,10,10,20,5\n",
        )
        .unwrap();
        fs::write(dir.path().join("ETHUSDT_1h.csv"), "timestamp,open,high,low,close,volume\n0,2,2,2,2,3\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("README.csv"), "ignored").unwrap();
        fs::write(dir.path().join(TICKERS_FILE), r#"[{"symbol": "ETHUSDT", "turnover24h": 5000000.0}]"#).unwrap();

        let store = MarketDataStore::from_csv_dir(dir.path()).unwrap();
        assert_eq!(store.get_candles("BTCUSDT", TimeFrame::Minute15).unwrap().len(), 2);

        let tickers = store.tickers().await.unwrap();
        assert_eq!(tickers.len(), 2);
        // Only the last day counts toward derived turnover: 20 * 5.
        assert_eq!(tickers[0].symbol, "BTCUSDT");
        assert_eq!(tickers[0].quote_volume(), 100.0);
        assert_eq!(tickers[1].quote_volume(), 5_000_000.0);
    }

    #[test]
    fn test_from_csv_dir_propagates_bad_rows() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("BTCUSDT_15m.csv"), "timestamp,open,high,low,close,volume\n0,x,1,1,1,1\n").unwrap();
        let err = MarketDataStore::from_csv_dir(dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
    }
}
