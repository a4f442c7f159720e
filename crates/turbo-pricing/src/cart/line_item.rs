//! Line items captured for pricing.

use crate::error::{PricingError, PricingResult};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product the customer intends to buy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Chosen size, if the product has sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Chosen color, if the product has colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Minimum delivery cost this item requires, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_hint: Option<Money>,
}

impl LineItem {
    /// Create a new line item without variant options or delivery hint.
    pub fn new(product_id: impl Into<ProductId>, unit_price: Money, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            size: None,
            color: None,
            unit_price,
            quantity,
            delivery_hint: None,
        }
    }

    /// Set the chosen size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the chosen color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the delivery hint.
    pub fn with_delivery_hint(mut self, hint: Money) -> Self {
        self.delivery_hint = Some(hint);
        self
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> PricingResult<Money> {
        self.unit_price.checked_mul(self.quantity)
    }

    /// Check the item against the cart's currency and the data-model bounds.
    pub(crate) fn validate(&self, currency: Currency) -> PricingResult<()> {
        if self.quantity < 1 {
            return Err(PricingError::InvalidQuantity(self.quantity));
        }

        let zero = Money::zero(currency);
        zero.ensure_same_currency(&self.unit_price)?;
        if self.unit_price.is_negative() {
            return Err(PricingError::NegativeAmount(format!(
                "unit price of {}",
                self.product_id
            )));
        }

        if let Some(hint) = &self.delivery_hint {
            zero.ensure_same_currency(hint)?;
            if hint.is_negative() {
                return Err(PricingError::NegativeAmount(format!(
                    "delivery hint of {}",
                    self.product_id
                )));
            }
        }

        Ok(())
    }
}
