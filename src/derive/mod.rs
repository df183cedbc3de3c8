//! Derived fields: total sales, month and price tier.
//!
//! Records produced here are never mutated; every report is computed
//! from the same immutable slice.

pub mod price_tier;
pub mod record;

// Re-export main types
pub use price_tier::{Inclusivity, PriceTier, PriceTiers};
pub use record::{derive_record, derive_records, SaleRecord, YearMonth};
