//! Shapes produced by the loader.
//!
//! A load happens in two phases: the raw text table (with its missing-value
//! report) and then the typed rows parsed from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text cells as read from the CSV file, null tokens already mapped to `None`
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header names, trimmed, in file order
    pub headers: Vec<String>,

    /// One entry per data row, padded/truncated to `headers.len()` cells
    pub rows: Vec<Vec<Option<String>>>,

    /// Missing-value counts for every header column
    pub missing: MissingValueReport,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A typed sale row before derived fields are computed
#[derive(Debug, Clone, PartialEq)]
pub struct RawSale {
    /// 1-based data row number in the source file
    pub row: usize,
    pub product: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub order_date: NaiveDate,
    pub price: Decimal,
    pub quantity: i64,
}

/// Number of missing cells in one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
}

/// Per-column missing-value counts, in header order.
///
/// Informational only: a non-zero count never fails the load by itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValueReport {
    pub columns: Vec<ColumnMissing>,
}

impl MissingValueReport {
    /// Start a report with zero counts for the given headers
    pub fn for_headers(headers: &[String]) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|h| ColumnMissing {
                    column: h.clone(),
                    missing: 0,
                })
                .collect(),
        }
    }

    pub(crate) fn record_missing(&mut self, index: usize) {
        if let Some(col) = self.columns.get_mut(index) {
            col.missing += 1;
        }
    }

    /// Missing count for a column, matched case-insensitively
    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.column.eq_ignore_ascii_case(column))
            .map(|c| c.missing)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    pub fn has_missing(&self) -> bool {
        self.total() > 0
    }

    /// One line per column, aligned like a dataframe null count
    pub fn summary(&self) -> String {
        let width = self
            .columns
            .iter()
            .map(|c| c.column.len())
            .max()
            .unwrap_or(0);

        self.columns
            .iter()
            .map(|c| format!("{:<width$}  {}", c.column, c.missing, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_report_counts() {
        let headers = vec!["Product".to_string(), "Country".to_string()];
        let mut report = MissingValueReport::for_headers(&headers);
        report.record_missing(1);
        report.record_missing(1);
        report.record_missing(5); // out of range, ignored

        assert_eq!(report.get("country"), Some(2));
        assert_eq!(report.get("Product"), Some(0));
        assert_eq!(report.get("Price"), None);
        assert_eq!(report.total(), 2);
        assert!(report.has_missing());
    }

    #[test]
    fn test_missing_report_summary_alignment() {
        let headers = vec!["Qty".to_string(), "Country".to_string()];
        let report = MissingValueReport::for_headers(&headers);
        assert_eq!(report.summary(), "Qty      0\nCountry  0");
    }
}
