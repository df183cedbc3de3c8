//! Report JSON schema definitions.
//!
//! This module defines the structure of the report document written to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{GroupKey, Measure, SortOrder};
use crate::loader::MissingValueReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The six report views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    TopSellingProducts,
    ProductProfitability,
    SalesByPriceCategory,
    SalesByCategory,
    SalesByCountry,
    MonthlySalesTrend,
}

/// How a chart renderer should draw a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

impl ReportKind {
    /// Every report, in presentation order
    pub const ALL: [ReportKind; 6] = [
        ReportKind::TopSellingProducts,
        ReportKind::ProductProfitability,
        ReportKind::SalesByPriceCategory,
        ReportKind::SalesByCategory,
        ReportKind::SalesByCountry,
        ReportKind::MonthlySalesTrend,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::TopSellingProducts => "Top Selling Products",
            ReportKind::ProductProfitability => "Product Profitability",
            ReportKind::SalesByPriceCategory => "Sales by Price Category",
            ReportKind::SalesByCategory => "Sales by Category",
            ReportKind::SalesByCountry => "Sales by Country",
            ReportKind::MonthlySalesTrend => "Monthly Sales Trend",
        }
    }

    /// File-name friendly identifier
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::TopSellingProducts => "top_selling_products",
            ReportKind::ProductProfitability => "product_profitability",
            ReportKind::SalesByPriceCategory => "sales_by_price_category",
            ReportKind::SalesByCategory => "sales_by_category",
            ReportKind::SalesByCountry => "sales_by_country",
            ReportKind::MonthlySalesTrend => "monthly_sales_trend",
        }
    }

    pub fn group_key(&self) -> GroupKey {
        match self {
            ReportKind::TopSellingProducts | ReportKind::ProductProfitability => GroupKey::Product,
            ReportKind::SalesByPriceCategory => GroupKey::PriceCategory,
            ReportKind::SalesByCategory => GroupKey::Category,
            ReportKind::SalesByCountry => GroupKey::Country,
            ReportKind::MonthlySalesTrend => GroupKey::Month,
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self.group_key() {
            GroupKey::Product => "Product",
            GroupKey::Category => "Category",
            GroupKey::Country => "Country",
            GroupKey::Month => "Month",
            GroupKey::PriceCategory => "Price Category",
        }
    }

    pub fn measures(&self) -> &'static [Measure] {
        match self {
            ReportKind::ProductProfitability => &[Measure::TotalSales, Measure::Quantity],
            _ => &[Measure::TotalSales],
        }
    }

    pub fn order(&self) -> SortOrder {
        match self {
            ReportKind::SalesByPriceCategory | ReportKind::MonthlySalesTrend => SortOrder::Natural,
            _ => SortOrder::Descending(Measure::TotalSales),
        }
    }

    pub fn chart(&self) -> ChartKind {
        match self {
            ReportKind::MonthlySalesTrend => ChartKind::Line,
            _ => ChartKind::Bar,
        }
    }
}

/// One labelled row of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,

    /// Values aligned with the report's `columns`
    pub values: Vec<Decimal>,
}

/// A named, ordered report ready for a chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub chart: ChartKind,

    /// Measure headings, e.g. ["Total Sales", "Total Quantity"]
    pub columns: Vec<String>,

    pub rows: Vec<ReportRow>,

    /// Number of leading rows a chart should show (all when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_limit: Option<usize>,
}

impl Report {
    /// (label, first column) pairs in report order
    pub fn pairs(&self) -> Vec<(&str, Decimal)> {
        self.rows
            .iter()
            .map(|r| (r.label.as_str(), r.values.first().copied().unwrap_or_default()))
            .collect()
    }

    /// Pairs a chart should draw, honoring `chart_limit`
    pub fn chart_pairs(&self) -> Vec<(&str, Decimal)> {
        let mut pairs = self.pairs();
        if let Some(limit) = self.chart_limit {
            pairs.truncate(limit);
        }
        pairs
    }

    /// Sum of the first column
    pub fn total(&self) -> Decimal {
        self.pairs().iter().map(|(_, v)| *v).sum()
    }
}

/// Top-level report document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSet {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the reports were computed from
    pub source: String,

    /// Number of sale records aggregated
    pub record_count: usize,

    /// Missing values per input column
    pub missing_values: MissingValueReport,

    pub reports: Vec<Report>,

    /// Timestamp when the reports were generated
    pub generated_at: String,
}

impl ReportSet {
    pub fn get(&self, kind: ReportKind) -> Option<&Report> {
        self.reports.iter().find(|r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kinds() {
        for kind in ReportKind::ALL {
            let expected = if kind == ReportKind::MonthlySalesTrend {
                ChartKind::Line
            } else {
                ChartKind::Bar
            };
            assert_eq!(kind.chart(), expected);
        }
    }

    #[test]
    fn test_chart_pairs_respect_limit() {
        let report = Report {
            kind: ReportKind::ProductProfitability,
            title: "Product Profitability".to_string(),
            x_label: "Product".to_string(),
            y_label: "Total Sales".to_string(),
            chart: ChartKind::Bar,
            columns: vec!["Total Sales".to_string(), "Total Quantity".to_string()],
            rows: (0..3)
                .map(|i| ReportRow {
                    label: format!("p{}", i),
                    values: vec![Decimal::from(10 - i), Decimal::from(1)],
                })
                .collect(),
            chart_limit: Some(2),
        };

        assert_eq!(report.pairs().len(), 3);
        assert_eq!(report.chart_pairs(), vec![("p0", Decimal::from(10)), ("p1", Decimal::from(9))]);
        assert_eq!(report.total(), Decimal::from(27));
    }
}
