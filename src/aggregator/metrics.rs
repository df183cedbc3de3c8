//! Distribution statistics over an aggregate view.
//!
//! Used to describe how concentrated sales are across groups
//! (e.g. whether a handful of products carry most revenue).

use super::view::{AggregateView, Measure};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Summary of one measure across the groups of a view
#[derive(Debug, Clone, PartialEq)]
pub struct SalesDistribution {
    /// Sum across all groups
    pub total: Decimal,

    /// Number of groups
    pub group_count: usize,

    /// Mean per group
    pub mean: Decimal,

    /// Median per group (upper median for even counts)
    pub median: Decimal,

    /// Sum held by the largest 10% of groups (at least one group)
    pub top_10_percent_total: Decimal,

    /// `top_10_percent_total` as a percentage of `total`
    pub top_10_percent_share: f64,
}

impl Default for SalesDistribution {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            group_count: 0,
            mean: Decimal::ZERO,
            median: Decimal::ZERO,
            top_10_percent_total: Decimal::ZERO,
            top_10_percent_share: 0.0,
        }
    }
}

/// Calculate distribution statistics for `measure`
///
/// **Public** - provides summary statistics
///
/// Returns the default (all zero) distribution when the view is empty or
/// does not carry `measure`.
pub fn sales_distribution(view: &AggregateView, measure: Measure) -> SalesDistribution {
    let Some(slot) = view.measures.iter().position(|m| *m == measure) else {
        return SalesDistribution::default();
    };
    if view.groups.is_empty() {
        return SalesDistribution::default();
    }

    let mut values: Vec<Decimal> = view.groups.iter().map(|g| g.values[slot]).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let count = values.len();
    let total: Decimal = values.iter().sum();
    let mean = total / Decimal::from(count);
    let median = values[(count - 1) / 2];

    let top_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_total: Decimal = values.iter().take(top_count.max(1)).sum();

    let top_10_percent_share = if total.is_zero() {
        0.0
    } else {
        (top_10_percent_total / total * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    };

    SalesDistribution {
        total,
        group_count: count,
        mean,
        median,
        top_10_percent_total,
        top_10_percent_share,
    }
}

impl SalesDistribution {
    /// True if the top 10% of groups hold more than 80% of the total
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_share > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Groups: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total.round_dp(2),
            self.group_count,
            self.mean.round_dp(2),
            self.median.round_dp(2),
            self.top_10_percent_share
        )
    }
}
