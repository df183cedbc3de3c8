use chrono::NaiveDate;
use rust_decimal::Decimal;
use sales_insight::chart::{render_chart, ChartConfig};
use sales_insight::derive::{PriceTiers, SaleRecord};
use sales_insight::loader::MissingValueReport;
use sales_insight::output::{read_report, report_to_string, validate_path, write_report, write_svg};
use sales_insight::report::{build_report, build_report_set, ReportKind, ReportOptions};
use std::path::Path;
use tempfile::NamedTempFile;

fn records() -> Vec<SaleRecord> {
    let tiers = PriceTiers::standard();
    vec![
        SaleRecord::new(
            1,
            Some("Chair".to_string()),
            Some("Furniture".to_string()),
            Some("Canada".to_string()),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Decimal::new(7450, 2),
            4,
            &tiers,
        )
        .unwrap(),
        SaleRecord::new(
            2,
            Some("Table".to_string()),
            Some("Furniture".to_string()),
            None,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            Decimal::from(320),
            1,
            &tiers,
        )
        .unwrap(),
    ]
}

#[test]
fn test_write_and_read_report_set() {
    let set = build_report_set(
        "furniture.csv",
        MissingValueReport::default(),
        &records(),
        &ReportOptions::default(),
    )
    .unwrap();
    let temp_file = NamedTempFile::new().unwrap();

    write_report(&set, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded.source, "furniture.csv");
    assert_eq!(loaded.record_count, 2);
    assert_eq!(loaded.reports, set.reports);
}

#[test]
fn test_json_keeps_exact_amounts() {
    let set = build_report_set(
        "furniture.csv",
        MissingValueReport::default(),
        &records(),
        &ReportOptions::default(),
    )
    .unwrap();

    let json = report_to_string(&set).unwrap();
    assert!(json.contains("\"298.00\""));
    assert!(json.contains("\"(missing)\""));
}

#[test]
fn test_chart_written_to_file() {
    let report = build_report(ReportKind::SalesByCountry, &records(), &ReportOptions::default()).unwrap();
    let svg = render_chart(&report, Some(&ChartConfig::new().with_title("Furniture by Country"))).unwrap();
    let temp_file = NamedTempFile::new().unwrap();

    write_svg(&svg, temp_file.path()).unwrap();

    let written = std::fs::read_to_string(temp_file.path()).unwrap();
    assert!(written.contains("Furniture by Country"));
    assert_eq!(written.matches("class=\"bar\"").count(), 2);
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}
