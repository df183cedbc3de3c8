//! End-to-end report generation: load -> derive -> aggregate.

use super::assembler::{assemble_reports, ReportOptions};
use super::schema::ReportSet;
use crate::aggregator::{aggregate, sales_distribution, GroupKey, Measure, SortOrder};
use crate::derive::{derive_records, SaleRecord};
use crate::loader::{parse_rows, read_table, MissingValueReport};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::{AggregateError, PipelineError};
use log::{info, warn};
use std::path::Path;

/// Package reports for an already-derived record set
pub fn build_report_set(
    source: impl Into<String>,
    missing_values: MissingValueReport,
    records: &[SaleRecord],
    options: &ReportOptions,
) -> Result<ReportSet, AggregateError> {
    let reports = assemble_reports(records, options)?;

    Ok(ReportSet {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        record_count: records.len(),
        missing_values,
        reports,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Run the whole pipeline on a file
///
/// Missing values in non-essential columns are logged as warnings, never
/// failures.
///
/// # Errors
/// A `PipelineError` naming the stage that failed.
pub fn analyze_file(
    path: impl AsRef<Path>,
    delimiter: u8,
    options: &ReportOptions,
) -> Result<ReportSet, PipelineError> {
    analyze_file_with(path, delimiter, options, |missing| {
        if missing.has_missing() {
            warn!(
                "{} missing values in input:\n{}",
                missing.total(),
                missing.summary()
            );
        }
    })
}

/// Run the whole pipeline, handing the missing-value report to `on_missing`
/// once the file is read and before any row is parsed or aggregated
pub fn analyze_file_with<F>(
    path: impl AsRef<Path>,
    delimiter: u8,
    options: &ReportOptions,
    on_missing: F,
) -> Result<ReportSet, PipelineError>
where
    F: FnOnce(&MissingValueReport),
{
    let path = path.as_ref();

    let table = read_table(path, delimiter)?;
    on_missing(&table.missing);

    info!("Parsing {} rows...", table.row_count());
    let rows = parse_rows(&table)?;

    info!("Deriving total sales, month and price tier...");
    let records = derive_records(&rows, &options.tiers)?;

    info!("Building reports...");
    let report_set = build_report_set(
        path.display().to_string(),
        table.missing,
        &records,
        options,
    )?;

    let product_view = aggregate(
        &records,
        GroupKey::Product,
        &[Measure::TotalSales],
        SortOrder::Descending(Measure::TotalSales),
    )?;
    let distribution = sales_distribution(&product_view, Measure::TotalSales);
    info!("Product sales distribution: {}", distribution.summary());
    if distribution.is_highly_concentrated() {
        info!("Sales are highly concentrated in the top 10% of products");
    }

    info!(
        "Built {} reports from {} records",
        report_set.reports.len(),
        report_set.record_count
    );

    Ok(report_set)
}
