//! Promotion documents as stored in the catalog.
//!
//! The document store keeps promotions as flat records with a string
//! `type` and optional fields whose meaning depends on it. This module is
//! the only place that reads that shape; everything past it works with
//! [`Promotion`].

use crate::error::{PricingError, PricingResult};
use crate::money::{Currency, Money};
use crate::promotion::{BundleOffer, BundleTier, Promotion, PromotionCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A promotion document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    /// Document ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Code as entered by the administrator.
    pub code: String,
    /// `percentage`, `fixed`, `free_shipping` or `bundle_price`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Rate for `percentage`, amount for `fixed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Minimum subtotal in major units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<Decimal>,
    /// Whether the promotion is enabled.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Bundle product, for `bundle_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_product_id: Option<String>,
    /// Bundle tiers, for `bundle_price`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<TierRecord>,
}

/// A bundle tier document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierRecord {
    /// Quantity.
    pub qty: i64,
    /// Bundle price in major units.
    pub price: Decimal,
}

fn default_active() -> bool {
    true
}

impl PromotionRecord {
    /// Convert into a typed promotion priced in `currency`.
    pub fn into_promotion(self, currency: Currency) -> PricingResult<Promotion> {
        let code = PromotionCode::normalize(&self.code)
            .ok_or_else(|| self.invalid("code is blank"))?;

        let promotion = match self.kind.trim().to_lowercase().as_str() {
            "percentage" => {
                let rate = self.value.ok_or_else(|| self.invalid("percentage without value"))?;
                Promotion::percentage(code, rate)?
            }
            "fixed" | "fixed_amount" => {
                let value = self.value.ok_or_else(|| self.invalid("fixed without value"))?;
                Promotion::fixed_amount(code, Money::from_decimal(value, currency)?)?
            }
            "free_shipping" => Promotion::free_shipping(code),
            "bundle_price" => {
                let target = self
                    .target_product_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| self.invalid("bundle without target product"))?;
                let tiers = self
                    .tiers
                    .iter()
                    .map(|t| Ok(BundleTier::new(t.qty, Money::from_decimal(t.price, currency)?)))
                    .collect::<PricingResult<Vec<_>>>()?;
                Promotion::bundle_price(code, BundleOffer::new(target, tiers)?)?
            }
            other => return Err(self.invalid(&format!("unknown type {:?}", other))),
        };

        let mut promotion = promotion.with_active(self.is_active);
        if let Some(min_order) = self.min_order {
            promotion = promotion.with_min_order(Money::from_decimal(min_order, currency)?)?;
        }
        if let Some(id) = self.id {
            promotion = promotion.with_id(id);
        }
        Ok(promotion)
    }

    fn invalid(&self, reason: &str) -> PricingError {
        PricingError::InvalidRecord {
            code: self.code.clone(),
            reason: reason.to_string(),
        }
    }
}
