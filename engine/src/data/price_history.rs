use super::PriceHistory;
use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::PriceSample;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryPriceHistory {
    samples: RwLock<HashMap<String, Vec<PriceSample>>>,
}

impl MemoryPriceHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PriceHistory for MemoryPriceHistory {
    async fn price_window(&self, token: &str, since_ms: i64) -> Result<Vec<PriceSample>, EngineError> {
        let samples = self.samples.read().await;
        Ok(samples
            .get(token)
            .map(|s| s.iter().filter(|p| p.timestamp >= since_ms).copied().collect())
            .unwrap_or_default())
    }

    async fn record_price(&self, token: &str, sample: PriceSample) -> Result<(), EngineError> {
        let mut samples = self.samples.write().await;
        let series = samples.entry(token.to_string()).or_default();
        // Keep ascending order even if samples arrive late.
        let pos = series.partition_point(|p| p.timestamp <= sample.timestamp);
        series.insert(pos, sample);
        Ok(())
    }
}
