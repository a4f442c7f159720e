//! Pricing error types.
//!
//! These are faults: the caller broke a data-model contract or a
//! collaborator failed. A promotion that simply does not apply is not an
//! error; see [`RejectionReason`](crate::promotion::RejectionReason).

use thiserror::Error;

/// Errors that stop a pricing request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A cart snapshot must hold at least one line item.
    #[error("Cart snapshot has no line items")]
    EmptyCart,

    /// Line item quantity outside the allowed range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A price, hint or threshold was negative.
    #[error("Negative amount where a non-negative one is required: {0}")]
    NegativeAmount(String),

    /// Percentage rate outside (0, 100].
    #[error("Percentage rate must be in (0, 100], got {0}")]
    InvalidRate(String),

    /// Fixed discount must be strictly positive.
    #[error("Fixed discount amount must be positive, got {0}")]
    NonPositiveAmount(String),

    /// Bundle offer without any tier.
    #[error("Bundle offer for {0} has no tiers")]
    EmptyBundle(String),

    /// Bundle tier quantity must be at least one.
    #[error("Bundle tier quantity must be positive, got {0}")]
    InvalidTierQuantity(i64),

    /// Two bundle tiers share the same quantity.
    #[error("Duplicate bundle tier for quantity {0}")]
    DuplicateTierQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Text that is not a decimal amount.
    #[error("Not a decimal amount: {0:?}")]
    InvalidAmount(String),

    /// Decimal amount finer than the currency's minor unit.
    #[error("Amount {amount} has more precision than {currency} allows")]
    ExcessPrecision { amount: String, currency: String },

    /// A catalog document could not be turned into a promotion.
    #[error("Invalid promotion record {code}: {reason}")]
    InvalidRecord { code: String, reason: String },

    /// The promotion catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors raised by a [`PromotionCatalog`](crate::promotion::PromotionCatalog).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Backend could not be reached or answered with a failure.
    #[error("Promotion catalog unavailable: {0}")]
    Unavailable(String),

    /// More than one promotion answered to a single normalized code.
    #[error("Promotion code {0} is ambiguous in the catalog")]
    AmbiguousCode(String),
}

/// Result alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
