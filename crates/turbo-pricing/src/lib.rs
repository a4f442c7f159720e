//! Order pricing and promotion resolution for TurboCommerce storefronts.
//!
//! This crate turns a cart snapshot and an optional customer-entered
//! promotion code into a final, persisted-ready order price:
//!
//! - **Cart**: Validated snapshot of line items in a single currency
//! - **Promotion**: Typed promotions, catalog lookup, eligibility rules
//! - **Pricing**: Discount calculation and order totals
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_pricing::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let catalog = InMemoryCatalog::from_promotions(vec![
//!     Promotion::percentage(PromotionCode::normalize("SAVE20").unwrap(), dec!(20))?,
//! ])?;
//! let pricer = OrderPricer::new(catalog);
//!
//! let cart = CartSnapshot::new(vec![
//!     LineItem::new("shirt", Money::new(50_000, Currency::TND), 2),
//! ])?;
//!
//! let outcome = pricer
//!     .price(&cart, Some("save20"), Money::new(7_000, Currency::TND))
//!     .await?;
//! println!("Total: {}", outcome.order().total); // 87.000 TND
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod pricing;
pub mod promotion;

pub use error::{CatalogError, PricingError, PricingResult};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, PricingError, PricingResult};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartSnapshot, LineItem};

    // Promotion
    pub use crate::promotion::{
        BundleOffer, BundleTier, InMemoryCatalog, Percent, Promotion, PromotionCatalog,
        PromotionCode, PromotionKind, PromotionRecord, PromotionResolver, RejectionReason,
        Resolution,
    };

    // Pricing
    pub use crate::pricing::{
        DiscountCalculator, DiscountOutcome, OrderPricer, PricedOrder, PricingOutcome,
    };
}
