// engine/src/services/token_screen/mod.rs
// Gating pipeline for DEX tokens: blacklist, price history, shadow pump,
// rug check, then pump/dump and the trade-signal policy.

use crate::config::{DetectorSettings, EngineSettings};
use crate::data::{Blacklist, PriceHistory, SafetyChecker};
use crate::detection::{PatternDetector, TradeSignalPolicy};
use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::services::with_timeout;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use shared::models::{BlacklistDecision, PatternFlags, PriceSample, SafetyReport, TokenSnapshot, TradingSignal};
use std::sync::Arc;
use std::time::Duration;

const SHADOW_PUMP_REASON: &str = "Shadow pump detected (fake volume)";
const SAFE_RISK_LEVEL: &str = "GOOD";

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Already on the blacklist; nothing else was evaluated.
    AlreadyBlacklisted,
    /// Blacklisted by this evaluation.
    Blacklisted(BlacklistDecision),
    Signal(TradingSignal),
    NoSignal(PatternFlags),
}

pub struct TokenScreener {
    price_history: Arc<dyn PriceHistory>,
    safety: Arc<dyn SafetyChecker>,
    blacklist: Arc<dyn Blacklist>,
    detector: PatternDetector,
    policy: TradeSignalPolicy,
    detector_settings: DetectorSettings,
    timeout: Duration,
}

impl TokenScreener {
    pub fn new(
        settings: &EngineSettings,
        price_history: Arc<dyn PriceHistory>,
        safety: Arc<dyn SafetyChecker>,
        blacklist: Arc<dyn Blacklist>,
    ) -> Self {
        TokenScreener {
            price_history,
            safety,
            blacklist,
            detector: PatternDetector::new(),
            policy: TradeSignalPolicy::new(settings.trading),
            detector_settings: settings.detector,
            timeout: settings.screen.fetch_timeout(),
        }
    }

    pub async fn evaluate(&self, token: &TokenSnapshot) -> Outcome<Verdict> {
        self.evaluate_at(token, Utc::now()).await
    }

    /// Runs the pipeline as of `now`. Blacklist and price-history failures are
    /// reported as `ExternalFailure`; a failed rug check counts as unsafe.
    pub async fn evaluate_at(&self, token: &TokenSnapshot, now: DateTime<Utc>) -> Outcome<Verdict> {
        self.run(token, now).await.into()
    }

    async fn run(&self, token: &TokenSnapshot, now: DateTime<Utc>) -> Result<Verdict, EngineError> {
        let address = token.address.as_str();

        if with_timeout("blacklist lookup", self.timeout, self.blacklist.is_blacklisted(address)).await? {
            tracing::debug!(address, "Token already blacklisted");
            return Ok(Verdict::AlreadyBlacklisted);
        }

        // The window is read before the current sample is appended.
        let window_minutes = self.detector_settings.price_window_minutes;
        let since = ChronoDuration::try_minutes(window_minutes)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| EngineError::ConfigError(format!("price window of {} minutes is out of range", window_minutes)))?;
        let window = with_timeout(
            "read price window",
            self.timeout,
            self.price_history.price_window(address, since.timestamp_millis()),
        )
        .await?;
        let sample = PriceSample { price: token.price_usd, volume: token.volume_24h, timestamp: now.timestamp_millis() };
        with_timeout("record price", self.timeout, self.price_history.record_price(address, sample)).await?;

        let flags = self.detector.evaluate(token, &window);
        if flags.is_shadow_pump {
            return self.reject(token, SHADOW_PUMP_REASON.to_string()).await;
        }

        let report = match with_timeout("rug check", self.timeout, self.safety.check_token(address, &token.chain_id)).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(address, error_detail = %e, "Rug check failed, treating token as unsafe");
                SafetyReport::check_failed(e.to_string())
            }
        };
        if report.is_rug || report.risk_level != SAFE_RISK_LEVEL {
            return self.reject(token, format!("RugCheck failed: {}", report.risk_level)).await;
        }

        match self.policy.propose(token, &flags, now) {
            Some(signal) => {
                tracing::info!(
                    symbol = %token.symbol,
                    direction = ?signal.direction,
                    confidence = signal.confidence,
                    "Trade signal generated"
                );
                Ok(Verdict::Signal(signal))
            }
            None => {
                tracing::info!(symbol = %token.symbol, ?flags, "Token passed screening without signal");
                Ok(Verdict::NoSignal(flags))
            }
        }
    }

    async fn reject(&self, token: &TokenSnapshot, reason: String) -> Result<Verdict, EngineError> {
        with_timeout("blacklist insert", self.timeout, self.blacklist.add_to_blacklist(&token.address, &reason)).await?;
        tracing::warn!(address = %token.address, symbol = %token.symbol, reason = %reason, "Token blacklisted");
        Ok(Verdict::Blacklisted(BlacklistDecision::blacklist(reason)))
    }
}
