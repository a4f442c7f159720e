//! Immutable cart snapshots.

use crate::cart::LineItem;
use crate::error::{PricingError, PricingResult};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// The items a customer intends to buy, frozen at the moment pricing is
/// requested.
///
/// A snapshot is validated once on construction and never mutated
/// afterwards. If the cart changes, build a new snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Vec<LineItem>,
    currency: Currency,
}

impl CartSnapshot {
    /// Capture a snapshot of `items`.
    ///
    /// Returns an error if:
    /// - `items` is empty
    /// - an item's quantity is below one
    /// - a price or delivery hint is negative
    /// - items use different currencies
    pub fn new(items: Vec<LineItem>) -> PricingResult<Self> {
        let currency = items
            .first()
            .map(|item| item.unit_price.currency)
            .ok_or(PricingError::EmptyCart)?;

        for item in &items {
            item.validate(currency)?;
        }

        Ok(Self { items, currency })
    }

    /// The captured line items.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Currency shared by every item.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all items.
    pub fn subtotal(&self) -> PricingResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency), |acc, item| {
                acc.checked_add(&item.line_total()?)
            })
    }

    /// Items for a given product, across sizes and colors.
    pub fn items_for<'a>(
        &'a self,
        product_id: &'a ProductId,
    ) -> impl Iterator<Item = &'a LineItem> + 'a {
        self.items.iter().filter(move |i| &i.product_id == product_id)
    }

    /// Whether any item is for `product_id`.
    pub fn contains_product(&self, product_id: &ProductId) -> bool {
        self.items_for(product_id).next().is_some()
    }

    /// Delivery cost before promotions: the largest delivery hint among the
    /// items, or `fallback` when no item carries a hint.
    pub fn base_delivery_cost(&self, fallback: Money) -> PricingResult<Money> {
        Money::zero(self.currency).ensure_same_currency(&fallback)?;

        let mut hints = self.items.iter().filter_map(|i| i.delivery_hint.as_ref());
        match hints.next() {
            Some(first) => hints.try_fold(*first, |acc, hint| acc.max(hint)),
            None => Ok(fallback),
        }
    }
}

impl TryFrom<Vec<LineItem>> for CartSnapshot {
    type Error = PricingError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}
