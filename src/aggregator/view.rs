//! Group keys, measures, orderings and the aggregate view they produce.

use crate::derive::{PriceTier, SaleRecord, YearMonth};
use crate::utils::config::{MISSING_GROUP_LABEL, UNCLASSIFIED_LABEL};
use crate::utils::error::AggregateError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field whose values partition records into groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Product,
    Category,
    Country,
    Month,
    PriceCategory,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Product => "product",
            GroupKey::Category => "category",
            GroupKey::Country => "country",
            GroupKey::Month => "month",
            GroupKey::PriceCategory => "price_category",
        }
    }

    /// Group value of a record under this key
    pub fn value_of(&self, record: &SaleRecord) -> GroupValue {
        let text = |v: Option<&str>| {
            v.map(|s| GroupValue::Text(s.to_string()))
                .unwrap_or(GroupValue::Missing)
        };

        match self {
            GroupKey::Product => text(record.product()),
            GroupKey::Category => text(record.category()),
            GroupKey::Country => text(record.country()),
            GroupKey::Month => GroupValue::Month(record.month()),
            GroupKey::PriceCategory => record
                .price_category()
                .map(GroupValue::Tier)
                .unwrap_or(GroupValue::Unclassified),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "product" => Ok(GroupKey::Product),
            "category" => Ok(GroupKey::Category),
            "country" => Ok(GroupKey::Country),
            "month" => Ok(GroupKey::Month),
            "price_category" | "price_tier" | "tier" => Ok(GroupKey::PriceCategory),
            _ => Err(AggregateError::InvalidGroupKey(s.to_string())),
        }
    }
}

/// A group's key value.
///
/// Variant order is the natural order: within one group key, the
/// missing and unclassified buckets always sort last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupValue {
    Text(String),
    Month(YearMonth),
    Tier(PriceTier),
    Unclassified,
    Missing,
}

impl GroupValue {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Text(s) => f.write_str(s),
            GroupValue::Month(m) => write!(f, "{}", m),
            GroupValue::Tier(t) => write!(f, "{}", t),
            GroupValue::Unclassified => f.write_str(UNCLASSIFIED_LABEL),
            GroupValue::Missing => f.write_str(MISSING_GROUP_LABEL),
        }
    }
}

/// Numeric quantity summed per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    TotalSales,
    Quantity,
}

impl Measure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::TotalSales => "total_sales",
            Measure::Quantity => "quantity",
        }
    }

    /// Column heading used in reports
    pub fn title(&self) -> &'static str {
        match self {
            Measure::TotalSales => "Total Sales",
            Measure::Quantity => "Total Quantity",
        }
    }

    pub fn value_of(&self, record: &SaleRecord) -> Decimal {
        match self {
            Measure::TotalSales => record.total_sales(),
            Measure::Quantity => Decimal::from(record.quantity()),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "total_sales" | "sales" => Ok(Measure::TotalSales),
            "quantity" | "qty" => Ok(Measure::Quantity),
            _ => Err(AggregateError::InvalidMeasure(s.to_string())),
        }
    }
}

/// How groups are ordered in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest first; ties keep first-encountered order
    Descending(Measure),
    /// Ascending by group key (chronological for months)
    Natural,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Descending(m) => write!(f, "desc:{}", m),
            SortOrder::Natural => f.write_str("natural"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = AggregateError;

    /// Accepts `natural`, `asc`, `desc` (total sales) or `desc:<measure>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.split_once(':') {
            Some(("desc", measure)) => Ok(SortOrder::Descending(measure.parse()?)),
            Some(_) => Err(AggregateError::InvalidOrder(s.to_string())),
            None => match lowered.as_str() {
                "natural" | "asc" | "chronological" => Ok(SortOrder::Natural),
                "desc" => Ok(SortOrder::Descending(Measure::TotalSales)),
                _ => Err(AggregateError::InvalidOrder(s.to_string())),
            },
        }
    }
}

/// One group with its reduced measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub key: GroupValue,

    /// Sums aligned with the view's `measures`
    pub values: Vec<Decimal>,

    /// Number of records in the group
    pub count: usize,
}

impl GroupRow {
    pub(crate) fn empty(key: GroupValue, measure_count: usize) -> Self {
        Self {
            key,
            values: vec![Decimal::ZERO; measure_count],
            count: 0,
        }
    }
}

/// Ordered result of one aggregation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub group_key: GroupKey,
    pub measures: Vec<Measure>,
    pub order: SortOrder,
    pub groups: Vec<GroupRow>,
}

impl AggregateView {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keep only the first `n` groups
    pub fn top(mut self, n: usize) -> Self {
        self.groups.truncate(n);
        self
    }

    fn slot(&self, measure: Measure) -> Option<usize> {
        self.measures.iter().position(|m| *m == measure)
    }

    /// Sum of `measure` for the group with `key`
    pub fn value(&self, key: &GroupValue, measure: Measure) -> Option<Decimal> {
        let slot = self.slot(measure)?;
        self.groups
            .iter()
            .find(|g| &g.key == key)
            .map(|g| g.values[slot])
    }

    /// Sum of `measure` across every returned group
    pub fn total(&self, measure: Measure) -> Option<Decimal> {
        let slot = self.slot(measure)?;
        Some(self.groups.iter().map(|g| g.values[slot]).sum())
    }

    /// (label, value) pairs for one measure, in view order
    pub fn pairs(&self, measure: Measure) -> Option<Vec<(String, Decimal)>> {
        let slot = self.slot(measure)?;
        Some(
            self.groups
                .iter()
                .map(|g| (g.key.label(), g.values[slot]))
                .collect(),
        )
    }
}
