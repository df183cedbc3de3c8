//! Named reports over the aggregated sales data.
//!
//! This module handles:
//! - Mapping each report to its group key, measures and ordering
//! - Wrapping aggregate views as (label, value) rows
//! - Packaging all reports into a versioned document

pub mod assembler;
pub mod pipeline;
pub mod schema;

// Re-export main types
pub use assembler::{assemble_reports, build_report, report_from_view, ReportOptions};
pub use pipeline::{analyze_file, analyze_file_with, build_report_set};
pub use schema::{ChartKind, Report, ReportKind, ReportRow, ReportSet};
