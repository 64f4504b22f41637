use super::amount::Amount;
use crate::error::Result;
use async_trait::async_trait;

/// Identifies one rendered payload: the exact template text plus the amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub template: String,
    pub amount: Amount,
}

impl CacheKey {
    pub fn new(template: impl Into<String>, amount: Amount) -> Self {
        Self {
            template: template.into(),
            amount,
        }
    }
}

#[async_trait]
pub trait PayloadCache: Send + Sync {
    async fn store(&self, key: CacheKey, payload: String) -> Result<()>;
    async fn get(&self, key: &CacheKey) -> Result<Option<String>>;
    async fn len(&self) -> Result<usize>;
}

pub type PayloadCacheBox = Box<dyn PayloadCache>;
