//! Promotion definitions.

use std::collections::HashSet;

use crate::error::{PricingError, PricingResult};
use crate::ids::{ProductId, PromotionId};
use crate::money::Money;
use crate::promotion::PromotionCode;
use rust_decimal::Decimal;
use serde::Serialize;

/// A percentage rate in `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Validate a rate.
    pub fn new(rate: Decimal) -> PricingResult<Self> {
        if rate <= Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidRate(rate.to_string()));
        }
        Ok(Self(rate))
    }

    /// The rate as a decimal (e.g., `20` for 20%).
    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Total price for buying exactly `quantity` units of the bundle product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleTier {
    /// Units the tier applies to.
    pub quantity: i64,
    /// Price charged for those units together.
    pub bundle_price: Money,
}

impl BundleTier {
    /// Create a new tier.
    pub fn new(quantity: i64, bundle_price: Money) -> Self {
        Self {
            quantity,
            bundle_price,
        }
    }
}

/// Quantity-tiered price for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleOffer {
    target_product_id: ProductId,
    tiers: Vec<BundleTier>,
}

impl BundleOffer {
    /// Create a bundle offer.
    ///
    /// Tiers must be non-empty, have positive and unique quantities,
    /// non-negative prices, and share one currency.
    pub fn new(target_product_id: impl Into<ProductId>, tiers: Vec<BundleTier>) -> PricingResult<Self> {
        let target_product_id = target_product_id.into();
        let first = tiers
            .first()
            .ok_or_else(|| PricingError::EmptyBundle(target_product_id.to_string()))?;
        let currency = first.bundle_price.currency;

        let mut seen = HashSet::with_capacity(tiers.len());
        for tier in &tiers {
            if tier.quantity < 1 {
                return Err(PricingError::InvalidTierQuantity(tier.quantity));
            }
            if !seen.insert(tier.quantity) {
                return Err(PricingError::DuplicateTierQuantity(tier.quantity));
            }
            Money::zero(currency).ensure_same_currency(&tier.bundle_price)?;
            if tier.bundle_price.is_negative() {
                return Err(PricingError::NegativeAmount(format!(
                    "bundle price for {} x {}",
                    tier.quantity, target_product_id
                )));
            }
        }

        Ok(Self {
            target_product_id,
            tiers,
        })
    }

    /// Product the offer applies to.
    pub fn target_product_id(&self) -> &ProductId {
        &self.target_product_id
    }

    /// All tiers, in the order they were defined.
    pub fn tiers(&self) -> &[BundleTier] {
        &self.tiers
    }

    /// The tier for exactly `quantity` units, if one exists.
    pub fn tier_for(&self, quantity: i64) -> Option<&BundleTier> {
        self.tiers.iter().find(|t| t.quantity == quantity)
    }
}

/// What a promotion does. Exactly one kind per promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionKind {
    /// Percentage off the subtotal.
    Percentage { rate: Percent },
    /// Fixed amount off the subtotal.
    FixedAmount { amount: Money },
    /// Delivery becomes free.
    FreeShipping,
    /// Quantity-tiered price for one product.
    BundlePrice(BundleOffer),
}

impl PromotionKind {
    /// Short name for logs and listings.
    pub fn name(&self) -> &'static str {
        match self {
            PromotionKind::Percentage { .. } => "percentage",
            PromotionKind::FixedAmount { .. } => "fixed_amount",
            PromotionKind::FreeShipping => "free_shipping",
            PromotionKind::BundlePrice(_) => "bundle_price",
        }
    }

    fn validate(&self) -> PricingResult<()> {
        if let PromotionKind::FixedAmount { amount } = self {
            if !amount.is_positive() {
                return Err(PricingError::NonPositiveAmount(amount.to_string()));
            }
        }
        Ok(())
    }
}

/// A code-activated promotion as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<PromotionId>,
    code: PromotionCode,
    kind: PromotionKind,
    is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_order_amount: Option<Money>,
}

impl Promotion {
    /// Create an active promotion with no minimum order.
    pub fn new(code: PromotionCode, kind: PromotionKind) -> PricingResult<Self> {
        kind.validate()?;
        Ok(Self {
            id: None,
            code,
            kind,
            is_active: true,
            min_order_amount: None,
        })
    }

    /// Create a percentage promotion.
    pub fn percentage(code: PromotionCode, rate: Decimal) -> PricingResult<Self> {
        Self::new(
            code,
            PromotionKind::Percentage {
                rate: Percent::new(rate)?,
            },
        )
    }

    /// Create a fixed amount promotion.
    pub fn fixed_amount(code: PromotionCode, amount: Money) -> PricingResult<Self> {
        Self::new(code, PromotionKind::FixedAmount { amount })
    }

    /// Create a free shipping promotion.
    pub fn free_shipping(code: PromotionCode) -> Self {
        Self {
            id: None,
            code,
            kind: PromotionKind::FreeShipping,
            is_active: true,
            min_order_amount: None,
        }
    }

    /// Create a bundle price promotion.
    pub fn bundle_price(code: PromotionCode, offer: BundleOffer) -> PricingResult<Self> {
        Self::new(code, PromotionKind::BundlePrice(offer))
    }

    /// Attach the catalog document ID.
    pub fn with_id(mut self, id: impl Into<PromotionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Require a minimum subtotal. A zero amount means no minimum.
    pub fn with_min_order(mut self, amount: Money) -> PricingResult<Self> {
        if amount.is_negative() {
            return Err(PricingError::NegativeAmount(format!(
                "minimum order of {}",
                self.code
            )));
        }
        self.min_order_amount = if amount.is_zero() { None } else { Some(amount) };
        Ok(self)
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Catalog document ID, if known.
    pub fn id(&self) -> Option<&PromotionId> {
        self.id.as_ref()
    }

    /// Normalized code.
    pub fn code(&self) -> &PromotionCode {
        &self.code
    }

    /// Promotion kind.
    pub fn kind(&self) -> &PromotionKind {
        &self.kind
    }

    /// Whether the promotion may be applied.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Minimum subtotal required, if any.
    pub fn min_order_amount(&self) -> Option<&Money> {
        self.min_order_amount.as_ref()
    }
}
