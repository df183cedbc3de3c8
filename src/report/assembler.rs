//! Builds the named reports from aggregate views.
//!
//! No rendering happens here: a report is just ordered (label, values) rows
//! plus the metadata a chart renderer needs.

use super::schema::{Report, ReportKind, ReportRow};
use crate::aggregator::{aggregate, AggregateView};
use crate::derive::{PriceTiers, SaleRecord};
use crate::utils::config::DEFAULT_TOP_N;
use crate::utils::error::AggregateError;
use log::debug;

/// Options shared by every report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Groups kept by "top" reports and shown by limited charts
    pub top_n: usize,

    /// Price bins applied while deriving records
    pub tiers: PriceTiers,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            tiers: PriceTiers::standard(),
        }
    }
}

impl ReportOptions {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Build one report from the full record set
///
/// Top Selling Products is truncated to `top_n` groups. Product
/// Profitability keeps every product but limits its chart to `top_n`.
pub fn build_report(
    kind: ReportKind,
    records: &[SaleRecord],
    options: &ReportOptions,
) -> Result<Report, AggregateError> {
    let view = aggregate(records, kind.group_key(), kind.measures(), kind.order())?;

    let (view, chart_limit) = match kind {
        ReportKind::TopSellingProducts => (view.top(options.top_n), None),
        ReportKind::ProductProfitability => (view, Some(options.top_n)),
        _ => (view, None),
    };

    debug!("{}: {} rows", kind.title(), view.len());

    Ok(report_from_view(kind, &view, chart_limit))
}

/// Wrap an aggregate view as a named report
pub fn report_from_view(kind: ReportKind, view: &AggregateView, chart_limit: Option<usize>) -> Report {
    Report {
        kind,
        title: kind.title().to_string(),
        x_label: kind.x_label().to_string(),
        y_label: view
            .measures
            .first()
            .map(|m| m.title())
            .unwrap_or_default()
            .to_string(),
        chart: kind.chart(),
        columns: view.measures.iter().map(|m| m.title().to_string()).collect(),
        rows: view
            .groups
            .iter()
            .map(|g| ReportRow {
                label: g.key.label(),
                values: g.values.clone(),
            })
            .collect(),
        chart_limit,
    }
}

/// Build all six reports, in presentation order
pub fn assemble_reports(
    records: &[SaleRecord],
    options: &ReportOptions,
) -> Result<Vec<Report>, AggregateError> {
    ReportKind::ALL
        .iter()
        .map(|kind| build_report(*kind, records, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(product: &str, price: i64, qty: i64) -> SaleRecord {
        SaleRecord::new(
            1,
            Some(product.to_string()),
            None,
            None,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Decimal::from(price),
            qty,
            &PriceTiers::standard(),
        )
        .unwrap()
    }

    #[test]
    fn test_top_selling_is_truncated() {
        let records: Vec<SaleRecord> = (1..=15).map(|i| record(&format!("P{}", i), i, 1)).collect();
        let options = ReportOptions::default().with_top_n(5);

        let report = build_report(ReportKind::TopSellingProducts, &records, &options).unwrap();
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.rows[0].label, "P15");
        assert_eq!(report.chart_limit, None);
    }

    #[test]
    fn test_profitability_keeps_all_rows() {
        let records: Vec<SaleRecord> = (1..=15).map(|i| record(&format!("P{}", i), i, 2)).collect();

        let report =
            build_report(ReportKind::ProductProfitability, &records, &ReportOptions::default())
                .unwrap();
        assert_eq!(report.rows.len(), 15);
        assert_eq!(report.columns, vec!["Total Sales", "Total Quantity"]);
        assert_eq!(report.rows[0].values, vec![Decimal::from(30), Decimal::from(2)]);
        assert_eq!(report.chart_pairs().len(), 10);
    }

    #[test]
    fn test_missing_category_bucket() {
        let records = vec![record("A", 10, 1)];
        let report =
            build_report(ReportKind::SalesByCategory, &records, &ReportOptions::default()).unwrap();
        assert_eq!(report.rows[0].label, "(missing)");
    }

    #[test]
    fn test_assemble_all_reports() {
        let records = vec![record("A", 10, 1), record("B", 150, 2)];
        let reports = assemble_reports(&records, &ReportOptions::default()).unwrap();

        let kinds: Vec<ReportKind> = reports.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ReportKind::ALL.to_vec());
        for report in &reports {
            assert_eq!(report.total(), Decimal::from(310));
        }
    }
}
