use crate::domain::ports::{CacheKey, PayloadCache};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payload cache.
///
/// Uses `Arc<RwLock<HashMap<CacheKey, String>>>` so clones share one map.
/// Entries are never evicted; one process renders a bounded set of totals.
#[derive(Default, Clone)]
pub struct InMemoryPayloadCache {
    payloads: Arc<RwLock<HashMap<CacheKey, String>>>,
}

impl InMemoryPayloadCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayloadCache for InMemoryPayloadCache {
    async fn store(&self, key: CacheKey, payload: String) -> Result<()> {
        let mut payloads = self.payloads.write().await;
        payloads.insert(key, payload);
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let payloads = self.payloads.read().await;
        Ok(payloads.get(key).cloned())
    }

    async fn len(&self) -> Result<usize> {
        let payloads = self.payloads.read().await;
        Ok(payloads.len())
    }
}
