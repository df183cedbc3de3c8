use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report_set = read_report(&file_path)?;

    if report_set.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema version {} (expected {})",
            report_set.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report_set.version);
    println!("  Source: {}", report_set.source);
    println!("  Records: {}", report_set.record_count);
    println!("  Missing Values: {}", report_set.missing_values.total());
    println!("  Reports: {}", report_set.reports.len());
    for report in &report_set.reports {
        println!("    {} ({} rows)", report.title, report.rows.len());
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Sales Insight Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  source: string            - Input file the reports were built from");
        println!("  record_count: number      - Sale records after derivation");
        println!("  missing_values: object    - Null counts per input column");
        println!("    columns: array          - {{ column, missing }} in header order");
        println!("  reports: array            - One entry per named report");
        println!("    kind: string            - e.g. 'top_selling_products'");
        println!("    title: string           - Display title");
        println!("    x_label, y_label: string - Axis labels");
        println!("    chart: string           - 'bar' or 'line'");
        println!("    columns: array          - Measure titles");
        println!("    rows: array             - {{ label, values }}; values are decimal strings");
        println!("    chart_limit: number?    - Rows shown in the chart (if limited)");
        println!("  generated_at: string      - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Sales Insight v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregates retail sales CSV files into ranked, categorical and monthly reports.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MissingValueReport;
    use crate::output::write_report;
    use crate::report::ReportSet;
    use tempfile::NamedTempFile;

    fn report_set(version: &str) -> ReportSet {
        ReportSet {
            version: version.to_string(),
            source: "sales.csv".to_string(),
            record_count: 0,
            missing_values: MissingValueReport::default(),
            reports: Vec::new(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_validate_report_file() {
        let file = NamedTempFile::new().unwrap();
        write_report(&report_set(SCHEMA_VERSION), file.path()).unwrap();
        assert!(validate_report_file(file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_report_file_wrong_version() {
        let file = NamedTempFile::new().unwrap();
        write_report(&report_set("0.1.0"), file.path()).unwrap();
        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_report_file_not_json() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"OrderDate,Price\n").unwrap();
        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }
}
