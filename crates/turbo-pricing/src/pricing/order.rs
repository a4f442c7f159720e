//! Priced order results.

use crate::error::PricingResult;
use crate::money::Money;
use crate::promotion::RejectionReason;
use serde::{Deserialize, Serialize};

/// Final pricing of an order.
///
/// Written verbatim into the persisted order, so the total the customer
/// confirms is the total that is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricedOrder {
    /// Sum of line totals before any discount.
    pub subtotal: Money,
    /// Amount taken off the subtotal.
    pub discount: Money,
    /// Delivery cost after any promotion override.
    pub delivery_cost: Money,
    /// `max(0, subtotal - discount) + delivery_cost`.
    pub total: Money,
    /// Normalized code of the applied promotion.
    pub applied_promotion_code: Option<String>,
}

impl PricedOrder {
    pub(crate) fn assemble(
        subtotal: Money,
        discount: Money,
        delivery_cost: Money,
        applied_promotion_code: Option<String>,
    ) -> PricingResult<Self> {
        let total = subtotal
            .sub_floor_zero(&discount)?
            .checked_add(&delivery_cost)?;
        Ok(Self {
            subtotal,
            discount,
            delivery_cost,
            total,
            applied_promotion_code,
        })
    }

    /// Check if a discount was granted.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Subtotal after discount, before delivery.
    pub fn discounted_subtotal(&self) -> PricingResult<Money> {
        self.subtotal.sub_floor_zero(&self.discount)
    }
}

/// Outcome of one pricing attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PricingOutcome {
    /// Priced without a code, or with a code that applied.
    Priced(PricedOrder),
    /// A code was entered but rejected; `order` is priced as if no code
    /// had been entered.
    Rejected {
        order: PricedOrder,
        reason: RejectionReason,
    },
}

impl PricingOutcome {
    /// The currently correct priced order.
    pub fn order(&self) -> &PricedOrder {
        match self {
            PricingOutcome::Priced(order) => order,
            PricingOutcome::Rejected { order, .. } => order,
        }
    }

    /// Consume and return the priced order.
    pub fn into_order(self) -> PricedOrder {
        match self {
            PricingOutcome::Priced(order) => order,
            PricingOutcome::Rejected { order, .. } => order,
        }
    }

    /// Why the entered code was rejected, if it was.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            PricingOutcome::Priced(_) => None,
            PricingOutcome::Rejected { reason, .. } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn tnd(amount: i64) -> Money {
        Money::new(amount, Currency::TND)
    }

    #[test]
    fn test_total_decomposition() {
        let order = PricedOrder::assemble(tnd(100_000), tnd(20_000), tnd(7_000), None).unwrap();
        assert_eq!(order.total, tnd(87_000));
        assert_eq!(order.discounted_subtotal().unwrap(), tnd(80_000));
        assert!(order.has_discount());
    }

    #[test]
    fn test_total_never_below_delivery() {
        let order = PricedOrder::assemble(tnd(10_000), tnd(10_000), tnd(7_000), None).unwrap();
        assert_eq!(order.total, tnd(7_000));
    }

    #[test]
    fn test_rejected_outcome_exposes_order() {
        let order = PricedOrder::assemble(tnd(150_000), tnd(0), tnd(7_000), None).unwrap();
        let outcome = PricingOutcome::Rejected {
            order: order.clone(),
            reason: RejectionReason::BelowMinimumOrder,
        };

        assert_eq!(outcome.order(), &order);
        assert_eq!(outcome.rejection(), Some(RejectionReason::BelowMinimumOrder));
        assert_eq!(outcome.into_order(), order);
    }

    #[test]
    fn test_outcome_serializes_status() {
        let order = PricedOrder::assemble(tnd(1_000), tnd(0), tnd(0), None).unwrap();
        let json = serde_json::to_value(PricingOutcome::Rejected {
            order,
            reason: RejectionReason::NotFound,
        })
        .unwrap();

        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "not_found");
        assert_eq!(json["order"]["total"]["amount_minor"], 1_000);
    }
}
