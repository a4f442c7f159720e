//! Promotion catalog collaborator.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CatalogError, PricingResult};
use crate::money::Currency;
use crate::promotion::{Promotion, PromotionCode, PromotionRecord};

/// Read access to the store of promotions.
///
/// Implementations return at most one promotion per normalized code and
/// report `is_active` as it is at call time. A backend that can filter by
/// status returns only active promotions; one that cannot may return an
/// inactive promotion, and the resolver rejects it.
#[async_trait]
pub trait PromotionCatalog: Send + Sync {
    /// Look up a promotion by normalized code.
    async fn find_active_by_normalized_code(
        &self,
        code: &PromotionCode,
    ) -> Result<Option<Promotion>, CatalogError>;
}

#[async_trait]
impl<T: PromotionCatalog + ?Sized> PromotionCatalog for Arc<T> {
    async fn find_active_by_normalized_code(
        &self,
        code: &PromotionCode,
    ) -> Result<Option<Promotion>, CatalogError> {
        (**self).find_active_by_normalized_code(code).await
    }
}

/// In-memory promotion catalog (for development/testing and the CLI).
///
/// Lookups return inactive promotions unless [`with_active_filter`] is
/// set, so the resolver reports them as inactive.
///
/// [`with_active_filter`]: InMemoryCatalog::with_active_filter
///
/// Administrative mutations may run concurrently with lookups; a lookup
/// sees the catalog as of the moment it acquires the read lock.
#[derive(Debug)]
pub struct InMemoryCatalog {
    promotions: RwLock<HashMap<PromotionCode, Promotion>>,
    filters_inactive: bool,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self {
            promotions: RwLock::new(HashMap::new()),
            filters_inactive: false,
        }
    }
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from promotions.
    ///
    /// Fails with [`CatalogError::AmbiguousCode`] if two promotions share a
    /// normalized code.
    pub fn from_promotions(
        promotions: impl IntoIterator<Item = Promotion>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for promotion in promotions {
            let code = promotion.code().clone();
            if map.insert(code.clone(), promotion).is_some() {
                return Err(CatalogError::AmbiguousCode(code.to_string()));
            }
        }
        Ok(Self {
            promotions: RwLock::new(map),
            filters_inactive: false,
        })
    }

    /// Build a catalog from stored documents.
    pub fn from_records(
        records: impl IntoIterator<Item = PromotionRecord>,
        currency: Currency,
    ) -> PricingResult<Self> {
        let promotions = records
            .into_iter()
            .map(|r| r.into_promotion(currency))
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(Self::from_promotions(promotions)?)
    }

    /// Hide inactive promotions from lookups, like a backend that queries
    /// by status. Inactive codes then resolve as not found.
    pub fn with_active_filter(mut self) -> Self {
        self.filters_inactive = true;
        self
    }

    /// Insert or replace a promotion. Returns the previous one.
    pub async fn upsert(&self, promotion: Promotion) -> Option<Promotion> {
        let mut promotions = self.promotions.write().await;
        promotions.insert(promotion.code().clone(), promotion)
    }

    /// Toggle a promotion's active flag. Returns `false` if the code is unknown.
    pub async fn set_active(&self, code: &PromotionCode, active: bool) -> bool {
        let mut promotions = self.promotions.write().await;
        match promotions.get_mut(code) {
            Some(promotion) => {
                promotion.set_active(active);
                true
            }
            None => false,
        }
    }

    /// Remove a promotion.
    pub async fn remove(&self, code: &PromotionCode) -> Option<Promotion> {
        self.promotions.write().await.remove(code)
    }

    /// All promotions, ordered by code.
    pub async fn list(&self) -> Vec<Promotion> {
        let promotions = self.promotions.read().await;
        let mut all: Vec<Promotion> = promotions.values().cloned().collect();
        all.sort_by(|a, b| a.code().cmp(b.code()));
        all
    }
}

#[async_trait]
impl PromotionCatalog for InMemoryCatalog {
    async fn find_active_by_normalized_code(
        &self,
        code: &PromotionCode,
    ) -> Result<Option<Promotion>, CatalogError> {
        let promotions = self.promotions.read().await;
        Ok(promotions
            .get(code)
            .filter(|p| !self.filters_inactive || p.is_active())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> PromotionCode {
        PromotionCode::normalize(raw).unwrap()
    }

    #[tokio::test]
    async fn test_filtered_lookup_hides_inactive() {
        let catalog = InMemoryCatalog::from_promotions(vec![
            Promotion::percentage(code("ON"), dec!(10)).unwrap(),
            Promotion::percentage(code("OFF"), dec!(10)).unwrap().with_active(false),
        ])
        .unwrap()
        .with_active_filter();

        assert!(catalog.find_active_by_normalized_code(&code("on")).await.unwrap().is_some());
        assert!(catalog.find_active_by_normalized_code(&code("off")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_returns_inactive_by_default() {
        let catalog = InMemoryCatalog::from_promotions(vec![
            Promotion::free_shipping(code("OFF")).with_active(false),
        ])
        .unwrap();

        let found = catalog.find_active_by_normalized_code(&code("OFF")).await.unwrap();
        assert!(!found.unwrap().is_active());
    }

    #[tokio::test]
    async fn test_set_active_and_remove() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert(Promotion::free_shipping(code("SHIP"))).await;

        assert!(catalog.set_active(&code("SHIP"), false).await);
        let found = catalog.find_active_by_normalized_code(&code("SHIP")).await.unwrap();
        assert!(!found.unwrap().is_active());
        assert!(!catalog.set_active(&code("NOPE"), false).await);

        assert!(catalog.remove(&code("SHIP")).await.is_some());
        assert!(catalog.list().await.is_empty());
    }

    async fn lookup<C: PromotionCatalog>(catalog: &C, raw: &str) -> Option<Promotion> {
        catalog.find_active_by_normalized_code(&code(raw)).await.unwrap()
    }

    #[tokio::test]
    async fn test_shared_catalog_sees_updates() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let shared: Arc<dyn PromotionCatalog> = catalog.clone();
        assert!(lookup(&shared, "SHIP").await.is_none());

        catalog.upsert(Promotion::free_shipping(code("SHIP"))).await;
        assert_eq!(lookup(&shared, "ship").await.unwrap().code(), &code("SHIP"));
        assert!(lookup(&catalog, "SHIP").await.is_some());
    }

    #[test]
    fn test_duplicate_codes_are_ambiguous() {
        let result = InMemoryCatalog::from_promotions(vec![
            Promotion::free_shipping(code("ship")),
            Promotion::free_shipping(code("SHIP ")),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::AmbiguousCode("SHIP".to_string())
        );
    }
}
