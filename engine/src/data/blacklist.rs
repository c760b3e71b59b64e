use super::Blacklist;
use crate::error::EngineError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Address to reason. The first reason recorded for an address is kept.
#[derive(Default)]
pub struct MemoryBlacklist {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reason(&self, address: &str) -> Option<String> {
        self.entries.read().await.get(address).cloned()
    }
}

#[async_trait]
impl Blacklist for MemoryBlacklist {
    async fn is_blacklisted(&self, address: &str) -> Result<bool, EngineError> {
        Ok(self.entries.read().await.contains_key(address))
    }

    async fn add_to_blacklist(&self, address: &str, reason: &str) -> Result<(), EngineError> {
        self.entries
            .write()
            .await
            .entry(address.to_string())
            .or_insert_with(|| reason.to_string());
        Ok(())
    }
}
