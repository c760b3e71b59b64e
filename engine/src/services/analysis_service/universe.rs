// Selection of the tradable symbol universe from exchange metadata.
use crate::config::ScreenSettings;
use shared::models::{Instrument, Ticker};
use shared::utils::validate_symbol;
use std::collections::HashMap;

/// A symbol chosen for ranking, with its 24h quote volume.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseEntry {
    pub symbol: String,
    pub volume_24h: f64,
}

fn is_trading(instrument: &Instrument) -> bool {
    matches!(instrument.status.as_deref(), None | Some("Trading") | Some("TRADING"))
}

/// Quote-asset symbols that are trading and liquid enough, most liquid first,
/// capped at `max_symbols`.
pub fn select_universe(instruments: &[Instrument], tickers: &[Ticker], screen: &ScreenSettings) -> Vec<UniverseEntry> {
    let volumes: HashMap<&str, f64> = tickers.iter().map(|t| (t.symbol.as_str(), t.quote_volume())).collect();

    let mut entries: Vec<UniverseEntry> = instruments
        .iter()
        .filter(|i| !i.symbol.is_empty() && i.symbol.ends_with(&screen.quote_asset))
        .filter(|i| is_trading(i))
        .filter_map(|i| {
            let volume_24h = volumes.get(i.symbol.as_str()).copied().unwrap_or(0.0);
            if volume_24h < screen.min_volume {
                return None;
            }
            match validate_symbol(&i.symbol) {
                Some(symbol) => Some(UniverseEntry { symbol, volume_24h }),
                None => {
                    tracing::warn!(symbol = %i.symbol, "Skipping malformed symbol");
                    None
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));
    entries.truncate(screen.max_symbols);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(symbol: &str, status: Option<&str>) -> Instrument {
        Instrument { symbol: symbol.to_string(), status: status.map(str::to_string) }
    }

    fn ticker(symbol: &str, turnover: Option<f64>, volume: Option<f64>) -> Ticker {
        Ticker { symbol: symbol.to_string(), turnover_24h: turnover, volume_24h: volume }
    }

    fn names(entries: &[UniverseEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn test_filters_quote_status_and_volume() {
        let instruments = vec![
            instrument("BTCUSDT", Some("Trading")),
            instrument("ETHUSDT", Some("TRADING")),
            instrument("SOLUSDT", None),
            instrument("BTCUSDC", Some("Trading")),
            instrument("XRPUSDT", Some("Closed")),
            instrument("DOGEUSDT", Some("Trading")),
            instrument("", None),
        ];
        let tickers = vec![
            ticker("BTCUSDT", Some(9e9), None),
            ticker("ETHUSDT", None, Some(2e6)),
            ticker("SOLUSDT", Some(1e6), None),
            ticker("BTCUSDC", Some(5e9), None),
            ticker("XRPUSDT", Some(5e9), None),
            ticker("DOGEUSDT", Some(999_999.0), None),
        ];

        let universe = select_universe(&instruments, &tickers, &ScreenSettings::default());
        assert_eq!(names(&universe), vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
        assert_eq!(universe[1].volume_24h, 2e6);
    }

    #[test]
    fn test_missing_ticker_counts_as_zero_volume() {
        let instruments = vec![instrument("BTCUSDT", None)];
        assert!(select_universe(&instruments, &[], &ScreenSettings::default()).is_empty());

        let screen = ScreenSettings { min_volume: 0.0, ..Default::default() };
        assert_eq!(names(&select_universe(&instruments, &[], &screen)), vec!["BTCUSDT"]);
    }

    #[test]
    fn test_sorted_by_volume_and_capped() {
        let instruments: Vec<Instrument> = ["AUSDT", "BUSDT", "CUSDT", "DUSDT"].iter().map(|s| instrument(s, None)).collect();
        let tickers = vec![
            ticker("AUSDT", Some(2e6), None),
            ticker("BUSDT", Some(5e6), None),
            ticker("CUSDT", Some(2e6), None),
            ticker("DUSDT", Some(3e6), None),
        ];
        let screen = ScreenSettings { max_symbols: 3, ..Default::default() };
        // A and C tie; input order breaks the tie.
        assert_eq!(names(&select_universe(&instruments, &tickers, &screen)), vec!["BUSDT", "DUSDT", "AUSDT"]);
    }

    #[test]
    fn test_malformed_symbols_skipped() {
        let instruments = vec![instrument("BAD$USDT", None), instrument("OKUSDT", None)];
        let tickers = vec![ticker("BAD$USDT", Some(5e6), None), ticker("OKUSDT", Some(4e6), None)];
        assert_eq!(names(&select_universe(&instruments, &tickers, &ScreenSettings::default())), vec!["OKUSDT"]);
    }

    #[test]
    fn test_malformed_symbol_does_not_take_a_slot() {
        let instruments = vec![instrument("BAD$USDT", None), instrument("OKUSDT", None), instrument("NEXTUSDT", None)];
        let tickers = vec![
            ticker("BAD$USDT", Some(9e6), None),
            ticker("OKUSDT", Some(4e6), None),
            ticker("NEXTUSDT", Some(3e6), None),
        ];
        let screen = ScreenSettings { max_symbols: 2, ..Default::default() };
        assert_eq!(names(&select_universe(&instruments, &tickers, &screen)), vec!["OKUSDT", "NEXTUSDT"]);
    }
}
