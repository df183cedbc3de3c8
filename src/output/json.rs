//! JSON report output writer.
//!
//! Writes ReportSet documents to JSON files with proper formatting.

use super::{ensure_parent_dir, validate_path};
use crate::report::ReportSet;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report set to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report_set: &ReportSet, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing reports to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report_set).map_err(OutputError::SerializationFailed)?;

    info!(
        "Reports written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report set to a pretty JSON string
pub fn report_to_string(report_set: &ReportSet) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report_set).map_err(OutputError::SerializationFailed)
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report set from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ReportSet, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading reports from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report_set: ReportSet =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Reports loaded: version {}, source {}",
        report_set.version, report_set.source
    );

    Ok(report_set)
}
