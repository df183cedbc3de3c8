//! Sale records with derived fields.

use super::price_tier::{PriceTier, PriceTiers};
use crate::loader::RawSale;
use crate::utils::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month. Orders chronologically (year first).
///
/// Serialized as `"YYYY-MM"`; deserialization goes through `FromStr`, so an
/// out-of-range month is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `None` unless `month` is in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Truncate a date to its month
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year.parse().map_err(|_| format!("bad year in '{}'", s))?;
        let month: u32 = month.parse().map_err(|_| format!("bad month in '{}'", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// One sale with its derived fields. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    product: Option<String>,
    category: Option<String>,
    country: Option<String>,
    order_date: NaiveDate,
    price: Decimal,
    quantity: i64,
    total_sales: Decimal,
    price_category: Option<PriceTier>,
}

impl SaleRecord {
    /// Build a record, classifying its price with `tiers`
    ///
    /// # Errors
    /// * `ValidationError::NegativePrice` / `NegativeQuantity` - `row` names the source row
    /// * `ValidationError::TotalOverflow` - `price * quantity` does not fit in a `Decimal`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        row: usize,
        product: Option<String>,
        category: Option<String>,
        country: Option<String>,
        order_date: NaiveDate,
        price: Decimal,
        quantity: i64,
        tiers: &PriceTiers,
    ) -> Result<Self, ValidationError> {
        if price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice { row, price });
        }
        if quantity < 0 {
            return Err(ValidationError::NegativeQuantity { row, quantity });
        }
        let total_sales = price
            .checked_mul(Decimal::from(quantity))
            .ok_or(ValidationError::TotalOverflow {
                row,
                price,
                quantity,
            })?;

        Ok(Self {
            product,
            category,
            country,
            order_date,
            price,
            quantity,
            total_sales,
            price_category: tiers.classify(price),
        })
    }

    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price * quantity`, checked when the record was built
    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.order_date)
    }

    pub fn price_category(&self) -> Option<PriceTier> {
        self.price_category
    }
}

/// Derive one record from a parsed row
pub fn derive_record(raw: &RawSale, tiers: &PriceTiers) -> Result<SaleRecord, ValidationError> {
    SaleRecord::new(
        raw.row,
        raw.product.clone(),
        raw.category.clone(),
        raw.country.clone(),
        raw.order_date,
        raw.price,
        raw.quantity,
        tiers,
    )
}

/// Derive all records; the first out-of-domain row aborts
pub fn derive_records(
    rows: &[RawSale],
    tiers: &PriceTiers,
) -> Result<Vec<SaleRecord>, ValidationError> {
    let records = rows
        .iter()
        .map(|raw| derive_record(raw, tiers))
        .collect::<Result<Vec<_>, _>>()?;

    let unclassified = records
        .iter()
        .filter(|r| r.price_category().is_none())
        .count();
    debug!(
        "Derived {} records ({} outside every price tier)",
        records.len(),
        unclassified
    );

    Ok(records)
}
