//! Aggregation of sale records into grouped views.
//!
//! This module turns the immutable record set into:
//! - Grouped sums per product, category, country, month or price tier
//! - Ordered, optionally truncated views for reporting
//! - Distribution statistics across groups

pub mod engine;
pub mod metrics;
pub mod view;

// Re-export main types and functions
pub use engine::aggregate;
pub use metrics::{sales_distribution, SalesDistribution};
pub use view::{AggregateView, GroupKey, GroupRow, GroupValue, Measure, SortOrder};
