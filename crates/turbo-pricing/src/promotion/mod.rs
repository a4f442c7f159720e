//! Promotions.
//!
//! Contains the typed promotion model, its catalog document form, the
//! catalog collaborator interface and the resolver that decides whether a
//! code applies to a cart.

mod catalog;
mod code;
mod kind;
mod record;
mod resolver;

pub use catalog::{InMemoryCatalog, PromotionCatalog};
pub use code::PromotionCode;
pub use kind::{BundleOffer, BundleTier, Percent, Promotion, PromotionKind};
pub use record::{PromotionRecord, TierRecord};
pub use resolver::{check_eligibility, PromotionResolver, RejectionReason, Resolution};
