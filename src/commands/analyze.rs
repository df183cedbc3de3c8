//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the CSV and prints missing values per column
//! 2. Parses, derives and aggregates into the six reports
//! 3. Writes the JSON document and optional charts

use super::models::AnalyzeArgs;
use crate::chart::{render_chart, render_text_summary};
use crate::output::{chart_path, write_report, write_svg};
use crate::report::{analyze_file_with, ReportOptions, ReportSet};
use crate::utils::config::{MAX_TOP_N, MIN_CHART_WIDTH};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Returns the report set that was written, so callers can inspect it.
///
/// # Errors
/// Load, derive and aggregate failures carry their stage name; file write
/// failures carry the path.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<ReportSet> {
    let start_time = Instant::now();
    let options = ReportOptions::default().with_top_n(args.top_n);

    info!("Starting analysis of: {}", args.input.display());

    // Steps 1-2: Read, report missing values, then build reports
    info!("Step 1/3: Reading input...");
    let report_set = analyze_file_with(&args.input, args.delimiter, &options, |missing| {
        println!("Missing values per column:");
        println!("{}", missing.summary());
        info!("Step 2/3: Building reports...");
    })
    .context("Failed to build reports")?;

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");
    write_report(&report_set, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Reports written to: {}", args.output_json.display());

    if let Some(dir) = &args.chart_dir {
        for report in &report_set.reports {
            let path = chart_path(dir, report.kind.slug());
            let svg = render_chart(report, args.chart_config.as_ref())
                .with_context(|| format!("Failed to render chart '{}'", report.title))?;
            write_svg(&svg, &path)
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
            debug!("Chart written: {}", path.display());
        }
        info!("✓ {} charts written to: {}", report_set.reports.len(), dir.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("SALES SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Source:  {}", report_set.source);
        println!("Records: {}", report_set.record_count);
        for report in &report_set.reports {
            println!("\n{}", render_text_summary(report, args.top_n));
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report_set)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.top_n == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_n > MAX_TOP_N {
        anyhow::bail!("top is too large (max {})", MAX_TOP_N);
    }

    if let Some(config) = &args.chart_config {
        if config.width < MIN_CHART_WIDTH {
            anyhow::bail!("Chart width must be at least {} pixels", MIN_CHART_WIDTH);
        }
    }

    Ok(())
}
