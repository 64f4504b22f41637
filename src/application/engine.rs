use crate::application::mutator::make_dynamic_amount;
use crate::domain::amount::Amount;
use crate::domain::ports::{CacheKey, PayloadCacheBox};
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::debug;

/// Renders dynamic payloads for a stream of order totals.
///
/// `PayloadEngine` owns a cache backend and memoizes successful renders by
/// template text and amount. The cache only saves work: a miss and a hit
/// always produce the same payload, and failed renders are never stored.
pub struct PayloadEngine {
    cache: PayloadCacheBox,
}

impl PayloadEngine {
    /// Creates a new `PayloadEngine` backed by `cache`.
    pub fn new(cache: PayloadCacheBox) -> Self {
        Self { cache }
    }

    /// Returns the dynamic payload of `template` for `amount`.
    pub async fn render(&self, template: &str, amount: Decimal) -> Result<String> {
        let amount = Amount::new(amount)?;
        let key = CacheKey::new(template, amount);

        if let Some(payload) = self.cache.get(&key).await? {
            debug!(%amount, "payload cache hit");
            return Ok(payload);
        }

        let payload = make_dynamic_amount(template, amount)?;
        debug!(%amount, "payload rendered");
        self.cache.store(key, payload.clone()).await?;
        Ok(payload)
    }

    /// Number of distinct payloads currently memoized.
    pub async fn cached(&self) -> Result<usize> {
        self.cache.len().await
    }
}
