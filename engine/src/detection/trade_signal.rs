use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{PatternFlags, TokenSnapshot, TradeDirection, TradingSignal};
use uuid::Uuid;

const MIN_TRADE_LIQUIDITY: f64 = 50_000.0;
const MIN_PUMP_VOLUME: f64 = 50_000.0;
const NEW_PAIR_MAX_AGE_HOURS: i64 = 24;
const NEW_PAIR_MIN_LIQUIDITY: f64 = 100_000.0;
const NEW_PAIR_MIN_VOLUME: f64 = 100_000.0;
const NEW_PAIR_MAX_CHANGE: f64 = 50.0;
const NEW_PAIR_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeSettings {
    pub min_confidence: f64,
    pub stop_loss_percent: f64,
    pub take_profit_percent: f64,
}

impl Default for TradeSettings {
    fn default() -> Self {
        TradeSettings {
            min_confidence: 0.7,
            stop_loss_percent: 5.0,
            take_profit_percent: 10.0,
        }
    }
}

/// Turns pattern flags on a token that passed the safety gates into an
/// optional directional signal with stop-loss and take-profit levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeSignalPolicy {
    settings: TradeSettings,
}

impl TradeSignalPolicy {
    pub fn new(settings: TradeSettings) -> Self {
        TradeSignalPolicy { settings }
    }

    pub fn propose(&self, token: &TokenSnapshot, flags: &PatternFlags, now: DateTime<Utc>) -> Option<TradingSignal> {
        let (direction, confidence, reason) = self.candidate(token, flags, now)?;
        if confidence < self.settings.min_confidence {
            tracing::debug!(
                symbol = %token.symbol,
                confidence,
                min_confidence = self.settings.min_confidence,
                "Signal below confidence threshold"
            );
            return None;
        }

        let entry_price = token.price_usd;
        let sl = self.settings.stop_loss_percent / 100.0;
        let tp = self.settings.take_profit_percent / 100.0;
        let (stop_loss, take_profit) = match direction {
            TradeDirection::Long => (entry_price * (1.0 - sl), entry_price * (1.0 + tp)),
            TradeDirection::Short => (entry_price * (1.0 + sl), entry_price * (1.0 - tp)),
        };

        Some(TradingSignal {
            id: Uuid::new_v4(),
            symbol: token.symbol.clone(),
            direction,
            confidence,
            entry_price,
            stop_loss,
            take_profit,
            reason,
            timestamp: now,
        })
    }

    fn candidate(
        &self,
        token: &TokenSnapshot,
        flags: &PatternFlags,
        now: DateTime<Utc>,
    ) -> Option<(TradeDirection, f64, String)> {
        if flags.is_pump {
            // Pumps are only tradable with a reasonably deep pool.
            if token.liquidity > MIN_TRADE_LIQUIDITY && token.volume_24h > MIN_PUMP_VOLUME {
                let confidence = (0.5 + token.liquidity / 1_000_000.0 * 0.3).min(0.8);
                let reason = format!("Pump detected: {:.2}% price increase", token.price_change_24h);
                return Some((TradeDirection::Long, confidence, reason));
            }
            return None;
        }

        if flags.is_dump {
            if token.liquidity > MIN_TRADE_LIQUIDITY {
                let confidence = (0.5 + token.liquidity / 1_000_000.0 * 0.25).min(0.75);
                let reason = format!("Dump detected: {:.2}% price decrease", token.price_change_24h);
                return Some((TradeDirection::Short, confidence, reason));
            }
            return None;
        }

        let is_new = token.pair_age(now) < Duration::hours(NEW_PAIR_MAX_AGE_HOURS);
        if is_new
            && token.liquidity > NEW_PAIR_MIN_LIQUIDITY
            && token.volume_24h > NEW_PAIR_MIN_VOLUME
            && token.price_change_24h > 0.0
            && token.price_change_24h < NEW_PAIR_MAX_CHANGE
        {
            let reason = format!("New token with good fundamentals: {:.0} liquidity", token.liquidity);
            return Some((TradeDirection::Long, NEW_PAIR_CONFIDENCE, reason));
        }
        None
    }
}
