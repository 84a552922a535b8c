//! Collaborator seam for data the payment API did not embed.
//!
//! Subscription items are sometimes delivered unexpanded, and item prices may
//! arrive as bare id strings. The fetch layer that talks to the payment API
//! sits behind [`BillingDirectory`]; the calculators only ever skip a record
//! when a lookup fails, they never surface the error.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use thiserror::Error;

use revlens_types::{Price, SubscriptionItem};

/// Lookup failure at the directory seam.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// No price known under this id.
    #[error("price not found: {0}")]
    PriceNotFound(String),

    /// Items for this subscription are not available.
    #[error("subscription items unavailable: {0}")]
    ItemsUnavailable(String),

    /// Upstream fetch failed.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Directory of billing records fetched outside the embedded payload.
///
/// Both methods default to failing, so a directory only has to implement the
/// lookups it can actually serve.
pub trait BillingDirectory {
    /// Line items for a subscription whose payload did not embed them.
    fn subscription_items(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<SubscriptionItem>, DirectoryError> {
        Err(DirectoryError::ItemsUnavailable(subscription_id.into()))
    }

    /// Resolve a bare price id to the full price record.
    fn price(&self, price_id: &str) -> Result<Price, DirectoryError> {
        Err(DirectoryError::PriceNotFound(price_id.into()))
    }
}

/// Directory that resolves nothing. With it, every unexpanded reference is
/// skipped and the calculators degrade to their zero/empty answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl BillingDirectory for NoDirectory {}

/// In-memory directory over pre-fetched records. Used by callers that expand
/// everything up front, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    items: HashMap<String, Vec<SubscriptionItem>>,
    prices: HashMap<String, Price>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a price under its own id.
    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.insert(price.id.clone(), price);
        self
    }

    /// Register separately fetched items for a subscription.
    pub fn with_items(mut self, subscription_id: &str, items: Vec<SubscriptionItem>) -> Self {
        self.items.insert(subscription_id.into(), items);
        self
    }
}

impl BillingDirectory for StaticDirectory {
    fn subscription_items(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<SubscriptionItem>, DirectoryError> {
        self.items
            .get(subscription_id)
            .cloned()
            .ok_or_else(|| DirectoryError::ItemsUnavailable(subscription_id.into()))
    }

    fn price(&self, price_id: &str) -> Result<Price, DirectoryError> {
        self.prices
            .get(price_id)
            .cloned()
            .ok_or_else(|| DirectoryError::PriceNotFound(price_id.into()))
    }
}

/// TTL cache over another directory's price lookups.
///
/// Price records change rarely and are looked up once per subscription per
/// metrics pass, so successful lookups are held for `ttl` before hitting the
/// inner directory again. Failures are not cached.
pub struct CachingDirectory<D> {
    inner: D,
    ttl: Duration,
    prices: RwLock<HashMap<String, (Price, Instant)>>,
}

impl<D: BillingDirectory> CachingDirectory<D> {
    pub fn new(inner: D, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            prices: RwLock::new(HashMap::new()),
        }
    }

    /// Drop all cached prices.
    pub fn clear(&self) {
        self.prices.write().clear();
    }
}

impl<D: BillingDirectory> BillingDirectory for CachingDirectory<D> {
    fn subscription_items(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<SubscriptionItem>, DirectoryError> {
        self.inner.subscription_items(subscription_id)
    }

    fn price(&self, price_id: &str) -> Result<Price, DirectoryError> {
        if let Some((price, fetched_at)) = self.prices.read().get(price_id) {
            if fetched_at.elapsed() < self.ttl {
                return Ok(price.clone());
            }
        }
        let price = self.inner.price(price_id)?;
        self.prices
            .write()
            .insert(price_id.into(), (price.clone(), Instant::now()));
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price(id: &str, unit_amount: i64) -> Price {
        serde_json::from_value(json!({"id": id, "unit_amount": unit_amount})).unwrap()
    }

    #[test]
    fn test_no_directory_fails_every_lookup() {
        assert!(NoDirectory.price("price_1").is_err());
        assert!(NoDirectory.subscription_items("sub_1").is_err());
    }

    #[test]
    fn test_static_directory_lookups() {
        let dir = StaticDirectory::new().with_price(price("price_1", 2000));
        assert_eq!(dir.price("price_1").unwrap().unit_amount, Some(2000));
        assert!(dir.price("price_missing").is_err());
    }

    #[test]
    fn test_caching_directory_serves_from_cache() {
        let dir = CachingDirectory::new(
            StaticDirectory::new().with_price(price("price_1", 500)),
            Duration::from_secs(300),
        );
        assert!(dir.price("price_1").is_ok());
        // Second hit comes from the cache; either way the answer is stable.
        assert_eq!(dir.price("price_1").unwrap().unit_amount, Some(500));
        dir.clear();
        assert_eq!(dir.price("price_1").unwrap().unit_amount, Some(500));
    }

    #[test]
    fn test_caching_directory_does_not_cache_failures() {
        let dir = CachingDirectory::new(NoDirectory, Duration::from_secs(300));
        assert!(dir.price("price_1").is_err());
        assert!(dir.price("price_1").is_err());
    }
}
