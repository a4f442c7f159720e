//! Promotion resolution and eligibility.

use crate::cart::CartSnapshot;
use crate::error::PricingResult;
use crate::money::Money;
use crate::promotion::{Promotion, PromotionCatalog, PromotionCode, PromotionKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a code did not yield an applicable promotion.
///
/// A closed set so the presentation layer can map each value to a
/// localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// No promotion with that code.
    NotFound,
    /// The promotion exists but is switched off.
    Inactive,
    /// Subtotal is below the promotion's minimum order.
    BelowMinimumOrder,
    /// Bundle promotion whose product is not in the cart.
    TargetProductMissing,
}

impl RejectionReason {
    /// Stable identifier (e.g., "below_minimum_order").
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::NotFound => "not_found",
            RejectionReason::Inactive => "inactive",
            RejectionReason::BelowMinimumOrder => "below_minimum_order",
            RejectionReason::TargetProductMissing => "target_product_missing",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of resolving a code against a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The promotion applies to this cart.
    Applied(Promotion),
    /// The code does not yield an applicable promotion.
    Rejected(RejectionReason),
}

/// Resolves customer-entered codes to applicable promotions.
pub struct PromotionResolver<C> {
    catalog: C,
}

impl<C: PromotionCatalog> PromotionResolver<C> {
    /// Create a resolver over a catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolve a raw code as typed by the customer.
    ///
    /// Blank input resolves to [`RejectionReason::NotFound`] without a
    /// catalog lookup.
    pub async fn resolve_raw(&self, raw_code: &str, cart: &CartSnapshot) -> PricingResult<Resolution> {
        match PromotionCode::normalize(raw_code) {
            Some(code) => self.resolve(&code, cart, &cart.subtotal()?).await,
            None => Ok(Resolution::Rejected(RejectionReason::NotFound)),
        }
    }

    /// Resolve a normalized code for a cart whose subtotal is already known.
    ///
    /// Catalog failures and contract violations are errors; every other
    /// outcome is a [`Resolution`].
    #[tracing::instrument(name = "promotion.resolve", skip_all, fields(code = %code))]
    pub async fn resolve(
        &self,
        code: &PromotionCode,
        cart: &CartSnapshot,
        subtotal: &Money,
    ) -> PricingResult<Resolution> {
        let found = self
            .catalog
            .find_active_by_normalized_code(code)
            .await?
            .filter(|p| p.code() == code);

        let Some(promotion) = found else {
            tracing::debug!(reason = %RejectionReason::NotFound, "promotion rejected");
            return Ok(Resolution::Rejected(RejectionReason::NotFound));
        };

        match check_eligibility(&promotion, cart, subtotal)? {
            Some(reason) => {
                tracing::debug!(%reason, kind = promotion.kind().name(), "promotion rejected");
                Ok(Resolution::Rejected(reason))
            }
            None => {
                tracing::debug!(kind = promotion.kind().name(), "promotion applies");
                Ok(Resolution::Applied(promotion))
            }
        }
    }
}

/// Check a found promotion against the cart. `None` means it applies.
pub fn check_eligibility(
    promotion: &Promotion,
    cart: &CartSnapshot,
    subtotal: &Money,
) -> PricingResult<Option<RejectionReason>> {
    if !promotion.is_active() {
        return Ok(Some(RejectionReason::Inactive));
    }

    if let Some(minimum) = promotion.min_order_amount() {
        subtotal.ensure_same_currency(minimum)?;
        if subtotal.amount_minor < minimum.amount_minor {
            return Ok(Some(RejectionReason::BelowMinimumOrder));
        }
    }

    if let PromotionKind::BundlePrice(offer) = promotion.kind() {
        if !cart.contains_product(offer.target_product_id()) {
            return Ok(Some(RejectionReason::TargetProductMissing));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::error::{CatalogError, PricingError};
    use crate::money::Currency;
    use crate::promotion::{BundleOffer, BundleTier, InMemoryCatalog};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> PromotionCode {
        PromotionCode::normalize(raw).unwrap()
    }

    fn tnd(amount: i64) -> Money {
        Money::new(amount, Currency::TND)
    }

    fn cart() -> CartSnapshot {
        CartSnapshot::new(vec![
            LineItem::new("shirt", tnd(50_000), 2),
            LineItem::new("cap", tnd(50_000), 1),
        ])
        .unwrap()
    }

    fn resolver(promotions: Vec<Promotion>) -> PromotionResolver<InMemoryCatalog> {
        PromotionResolver::new(InMemoryCatalog::from_promotions(promotions).unwrap())
    }

    struct DownCatalog;

    #[async_trait]
    impl PromotionCatalog for DownCatalog {
        async fn find_active_by_normalized_code(
            &self,
            _code: &PromotionCode,
        ) -> Result<Option<Promotion>, CatalogError> {
            Err(CatalogError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_resolve_is_case_insensitive() {
        let resolver = resolver(vec![Promotion::percentage(code("SAVE20"), dec!(20)).unwrap()]);
        let cart = cart();

        let mut results = Vec::new();
        for raw in ["SAVE20", "save20", " Save20 "] {
            results.push(resolver.resolve_raw(raw, &cart).await.unwrap());
        }

        assert!(matches!(results[0], Resolution::Applied(_)));
        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }

    #[tokio::test]
    async fn test_unknown_and_blank_codes_not_found() {
        let resolver = resolver(vec![]);
        let cart = cart();

        assert_eq!(
            resolver.resolve_raw("NOPE", &cart).await.unwrap(),
            Resolution::Rejected(RejectionReason::NotFound)
        );
        assert_eq!(
            resolver.resolve_raw("   ", &cart).await.unwrap(),
            Resolution::Rejected(RejectionReason::NotFound)
        );
    }

    #[tokio::test]
    async fn test_inactive_promotion_rejected() {
        let resolver = resolver(vec![Promotion::free_shipping(code("SHIP")).with_active(false)]);

        assert_eq!(
            resolver.resolve_raw("ship", &cart()).await.unwrap(),
            Resolution::Rejected(RejectionReason::Inactive)
        );
    }

    #[tokio::test]
    async fn test_inactive_not_found_when_catalog_filters() {
        let catalog = InMemoryCatalog::from_promotions(vec![
            Promotion::free_shipping(code("SHIP")).with_active(false),
        ])
        .unwrap()
        .with_active_filter();
        let resolver = PromotionResolver::new(catalog);

        assert_eq!(
            resolver.resolve_raw("ship", &cart()).await.unwrap(),
            Resolution::Rejected(RejectionReason::NotFound)
        );
    }

    #[tokio::test]
    async fn test_below_minimum_order() {
        let promo = Promotion::percentage(code("BIG"), dec!(10))
            .unwrap()
            .with_min_order(tnd(200_000))
            .unwrap();
        let resolver = resolver(vec![promo]);

        // Subtotal is 150.000
        assert_eq!(
            resolver.resolve_raw("BIG", &cart()).await.unwrap(),
            Resolution::Rejected(RejectionReason::BelowMinimumOrder)
        );
    }

    #[tokio::test]
    async fn test_minimum_order_is_inclusive() {
        let promo = Promotion::percentage(code("EXACT"), dec!(10))
            .unwrap()
            .with_min_order(tnd(150_000))
            .unwrap();
        let resolver = resolver(vec![promo]);

        assert!(matches!(
            resolver.resolve_raw("EXACT", &cart()).await.unwrap(),
            Resolution::Applied(_)
        ));
    }

    #[tokio::test]
    async fn test_bundle_target_missing() {
        let offer = BundleOffer::new("socks", vec![BundleTier::new(2, tnd(15_000))]).unwrap();
        let resolver = resolver(vec![Promotion::bundle_price(code("SOCKS"), offer).unwrap()]);

        assert_eq!(
            resolver.resolve_raw("SOCKS", &cart()).await.unwrap(),
            Resolution::Rejected(RejectionReason::TargetProductMissing)
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_is_an_error() {
        let resolver = PromotionResolver::new(DownCatalog);
        let err = resolver.resolve_raw("SAVE20", &cart()).await.unwrap_err();
        assert!(matches!(err, PricingError::Catalog(CatalogError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_deactivation_between_attempts() {
        let resolver = resolver(vec![Promotion::free_shipping(code("SHIP"))]);
        let cart = cart();

        assert!(matches!(
            resolver.resolve_raw("SHIP", &cart).await.unwrap(),
            Resolution::Applied(_)
        ));

        resolver.catalog().set_active(&code("SHIP"), false).await;

        assert_eq!(
            resolver.resolve_raw("SHIP", &cart).await.unwrap(),
            Resolution::Rejected(RejectionReason::Inactive)
        );
    }
}
