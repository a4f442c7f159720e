//! Discount calculation.

use crate::cart::CartSnapshot;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::promotion::{BundleOffer, Promotion, PromotionKind};
use serde::{Deserialize, Serialize};

/// What a promotion does to an order's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    /// Amount taken off the subtotal, in `[0, subtotal]`.
    pub discount: Money,
    /// Delivery cost replacing the base one, if the promotion sets it.
    pub delivery_override: Option<Money>,
}

impl DiscountOutcome {
    /// No discount and no delivery change.
    pub fn none(subtotal: &Money) -> Self {
        Self {
            discount: Money::zero(subtotal.currency),
            delivery_override: None,
        }
    }
}

/// Computes the discount a resolved promotion grants.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Create a calculator.
    pub fn new() -> Self {
        Self
    }

    /// Apply `promotion` to a cart whose subtotal is `subtotal`.
    ///
    /// The returned discount is clamped to `[0, subtotal]` for every kind.
    pub fn apply(
        &self,
        cart: &CartSnapshot,
        subtotal: &Money,
        promotion: Option<&Promotion>,
    ) -> PricingResult<DiscountOutcome> {
        let Some(promotion) = promotion else {
            return Ok(DiscountOutcome::none(subtotal));
        };

        let zero = Money::zero(subtotal.currency);
        let mut delivery_override = None;

        let raw = match promotion.kind() {
            PromotionKind::Percentage { rate } => subtotal.percentage_floor(rate.value())?,
            PromotionKind::FixedAmount { amount } => amount.min(subtotal)?,
            PromotionKind::FreeShipping => {
                delivery_override = Some(zero);
                zero
            }
            PromotionKind::BundlePrice(offer) => bundle_discount(cart, offer)?,
        };

        let discount = raw.max(&zero)?.min(subtotal)?;
        tracing::trace!(
            kind = promotion.kind().name(),
            discount = %discount,
            free_delivery = delivery_override.is_some(),
            "discount computed"
        );

        Ok(DiscountOutcome {
            discount,
            delivery_override,
        })
    }
}

/// Savings from a bundle tier matching the cart's quantity of the target
/// product exactly; zero when no tier matches.
fn bundle_discount(cart: &CartSnapshot, offer: &BundleOffer) -> PricingResult<Money> {
    let zero = Money::zero(cart.currency());
    let mut quantity: i64 = 0;
    let mut original_cost = zero;

    for item in cart.items_for(offer.target_product_id()) {
        quantity = quantity
            .checked_add(item.quantity)
            .ok_or(PricingError::Overflow)?;
        original_cost = original_cost.checked_add(&item.line_total()?)?;
    }

    match offer.tier_for(quantity) {
        Some(tier) => original_cost.sub_floor_zero(&tier.bundle_price),
        None => Ok(zero),
    }
}
