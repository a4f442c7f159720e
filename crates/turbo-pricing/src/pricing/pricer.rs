//! Order pricing entry point.

use crate::cart::CartSnapshot;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::pricing::{DiscountCalculator, PricedOrder, PricingOutcome};
use crate::promotion::{PromotionCatalog, PromotionCode, PromotionResolver, Resolution};

/// Prices carts, resolving an optional promotion code on the way.
///
/// Each call is independent: the result depends only on the cart, the
/// code, the base delivery cost and what the catalog holds at call time.
pub struct OrderPricer<C> {
    resolver: PromotionResolver<C>,
    calculator: DiscountCalculator,
}

impl<C: PromotionCatalog> OrderPricer<C> {
    /// Create a pricer over a promotion catalog.
    pub fn new(catalog: C) -> Self {
        Self {
            resolver: PromotionResolver::new(catalog),
            calculator: DiscountCalculator::new(),
        }
    }

    /// The resolver used for codes.
    pub fn resolver(&self) -> &PromotionResolver<C> {
        &self.resolver
    }

    /// Price `cart`.
    ///
    /// A blank or missing code prices the cart without a promotion. A
    /// rejected code yields [`PricingOutcome::Rejected`] carrying the order
    /// priced without it. Contract violations and catalog failures are
    /// errors.
    #[tracing::instrument(
        name = "order.price",
        skip_all,
        fields(items = cart.items().len(), code = raw_code.unwrap_or_default())
    )]
    pub async fn price(
        &self,
        cart: &CartSnapshot,
        raw_code: Option<&str>,
        base_delivery_cost: Money,
    ) -> PricingResult<PricingOutcome> {
        let subtotal = cart.subtotal()?;
        subtotal.ensure_same_currency(&base_delivery_cost)?;
        if base_delivery_cost.is_negative() {
            return Err(PricingError::NegativeAmount("base delivery cost".to_string()));
        }

        let Some(code) = raw_code.and_then(PromotionCode::normalize) else {
            let order = self.price_without_promotion(cart, subtotal, base_delivery_cost)?;
            return Ok(PricingOutcome::Priced(order));
        };

        match self.resolver.resolve(&code, cart, &subtotal).await? {
            Resolution::Applied(promotion) => {
                let outcome = self.calculator.apply(cart, &subtotal, Some(&promotion))?;
                let delivery_cost = outcome.delivery_override.unwrap_or(base_delivery_cost);
                let order = PricedOrder::assemble(
                    subtotal,
                    outcome.discount,
                    delivery_cost,
                    Some(promotion.code().to_string()),
                )?;
                tracing::debug!(total = %order.total, discount = %order.discount, "order priced");
                Ok(PricingOutcome::Priced(order))
            }
            Resolution::Rejected(reason) => {
                let order = self.price_without_promotion(cart, subtotal, base_delivery_cost)?;
                Ok(PricingOutcome::Rejected { order, reason })
            }
        }
    }

    fn price_without_promotion(
        &self,
        cart: &CartSnapshot,
        subtotal: Money,
        base_delivery_cost: Money,
    ) -> PricingResult<PricedOrder> {
        let outcome = self.calculator.apply(cart, &subtotal, None)?;
        PricedOrder::assemble(subtotal, outcome.discount, base_delivery_cost, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::money::Currency;
    use crate::promotion::{InMemoryCatalog, Promotion, RejectionReason};
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> PromotionCode {
        PromotionCode::normalize(raw).unwrap()
    }

    fn tnd(amount: i64) -> Money {
        Money::new(amount, Currency::TND)
    }

    fn pricer() -> OrderPricer<InMemoryCatalog> {
        OrderPricer::new(
            InMemoryCatalog::from_promotions(vec![
                Promotion::percentage(code("SAVE20"), dec!(20)).unwrap(),
                Promotion::free_shipping(code("SHIP")),
            ])
            .unwrap(),
        )
    }

    fn cart() -> CartSnapshot {
        CartSnapshot::new(vec![LineItem::new("shirt", tnd(50_000), 2)]).unwrap()
    }

    #[tokio::test]
    async fn test_no_code() {
        let outcome = pricer().price(&cart(), None, tnd(7_000)).await.unwrap();
        let order = outcome.order();

        assert_eq!(outcome.rejection(), None);
        assert_eq!(order.subtotal, tnd(100_000));
        assert!(order.discount.is_zero());
        assert_eq!(order.delivery_cost, tnd(7_000));
        assert_eq!(order.total, tnd(107_000));
        assert_eq!(order.applied_promotion_code, None);
    }

    #[tokio::test]
    async fn test_blank_code_skips_resolution() {
        let pricer = pricer();
        let blank = pricer.price(&cart(), Some("   "), tnd(7_000)).await.unwrap();
        let none = pricer.price(&cart(), None, tnd(7_000)).await.unwrap();
        assert_eq!(blank, none);
    }

    #[tokio::test]
    async fn test_percentage_code() {
        let outcome = pricer().price(&cart(), Some("save20"), tnd(7_000)).await.unwrap();
        let order = outcome.order();

        assert_eq!(order.discount, tnd(20_000));
        assert_eq!(order.total, tnd(87_000));
        assert_eq!(order.applied_promotion_code.as_deref(), Some("SAVE20"));
    }

    #[tokio::test]
    async fn test_free_shipping_code() {
        let outcome = pricer().price(&cart(), Some("ship"), tnd(7_000)).await.unwrap();
        let order = outcome.order();

        assert!(order.discount.is_zero());
        assert!(order.delivery_cost.is_zero());
        assert_eq!(order.total, tnd(100_000));
    }

    #[tokio::test]
    async fn test_unknown_code_prices_without_promotion() {
        let pricer = pricer();
        let rejected = pricer.price(&cart(), Some("BOGUS"), tnd(7_000)).await.unwrap();
        let plain = pricer.price(&cart(), None, tnd(7_000)).await.unwrap();

        assert_eq!(rejected.rejection(), Some(RejectionReason::NotFound));
        assert_eq!(rejected.order(), plain.order());
    }

    #[tokio::test]
    async fn test_delivery_currency_mismatch() {
        let err = pricer()
            .price(&cart(), None, Money::new(700, Currency::EUR))
            .await
            .unwrap_err();
        assert!(matches!(err, PricingError::CurrencyMismatch { .. }));
    }

    #[tokio::test]
    async fn test_negative_delivery_rejected() {
        let err = pricer().price(&cart(), None, tnd(-1)).await.unwrap_err();
        assert!(matches!(err, PricingError::NegativeAmount(_)));
    }
}
