//! Order pricing.
//!
//! Contains the discount calculator, the priced order result and the
//! pricer that ties resolution and calculation together.

mod discount;
mod order;
mod pricer;

pub use discount::{DiscountCalculator, DiscountOutcome};
pub use order::{PricedOrder, PricingOutcome};
pub use pricer::OrderPricer;
