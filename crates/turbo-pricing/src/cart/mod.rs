//! Cart snapshots.
//!
//! Contains the line item and snapshot types the pricing engine consumes.

mod line_item;
mod snapshot;

pub use line_item::LineItem;
pub use snapshot::CartSnapshot;
