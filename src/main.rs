//! Sales Insight CLI
//!
//! Turns a retail sales CSV into ranked, categorical and monthly
//! reports, with JSON output and SVG charts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sales_insight::chart::ChartConfig;
use sales_insight::commands::{
    display_schema, display_version, execute_aggregate, execute_analyze, validate_aggregate_args,
    validate_args, validate_report_file, AggregateArgs, AnalyzeArgs,
};
use sales_insight::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_TOP_N};

/// Sales Insight - aggregation and reporting for retail sales data
#[derive(Parser, Debug)]
#[command(name = "sales-insight")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every report from a sales CSV
    Analyze {
        /// Sales CSV file
        #[arg(short, long, env = "SALES_INSIGHT_INPUT")]
        input: PathBuf,

        /// Output path for the JSON report document
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Directory for SVG charts (optional)
        #[arg(short, long)]
        charts: Option<PathBuf>,

        /// Number of groups in top-N reports and charts
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// CSV field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Prefix for every chart title
        #[arg(long)]
        title: Option<String>,

        /// Chart width in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,

        /// Chart height in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
        height: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Group by one key and print the sums
    Aggregate {
        /// Sales CSV file
        #[arg(short, long, env = "SALES_INSIGHT_INPUT")]
        input: PathBuf,

        /// Group key: product, category, country, month or price_category
        #[arg(short, long, default_value = "product")]
        by: String,

        /// Measures to sum: total_sales, quantity (repeatable or comma-separated)
        #[arg(short, long = "measure", value_delimiter = ',', default_value = "total_sales")]
        measures: Vec<String>,

        /// Ordering: natural, desc or desc:<measure>
        #[arg(long, default_value = "desc:total_sales")]
        order: String,

        /// Keep only the first N groups
        #[arg(long)]
        top: Option<usize>,

        /// CSV field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            charts,
            top,
            delimiter,
            title,
            width,
            height,
            summary,
        } => {
            // Chart config only matters when charts are written
            let chart_config = charts.as_ref().map(|_| {
                let mut config = ChartConfig::new();
                if let Some(title_str) = title {
                    config = config.with_title(title_str);
                }
                config.width = width;
                config.height = height;
                config
            });

            let args = AnalyzeArgs {
                input,
                output_json: output,
                chart_dir: charts,
                top_n: top,
                delimiter: delimiter_byte(delimiter)?,
                chart_config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Aggregate {
            input,
            by,
            measures,
            order,
            top,
            delimiter,
            json,
        } => {
            let args = AggregateArgs {
                input,
                by,
                measures,
                order,
                top,
                delimiter: delimiter_byte(delimiter)?,
                json,
            };

            validate_aggregate_args(&args)?;

            execute_aggregate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
