use crate::chart::ChartConfig;
use crate::utils::config::{DEFAULT_DELIMITER, DEFAULT_TOP_N};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Sales CSV file
    pub input: PathBuf,

    /// Output path for the JSON report document
    pub output_json: PathBuf,

    /// Directory for SVG charts (optional)
    pub chart_dir: Option<PathBuf>,

    /// Groups kept by top-N reports and charts
    pub top_n: usize,

    /// CSV field delimiter
    pub delimiter: u8,

    /// Chart configuration
    pub chart_config: Option<ChartConfig>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("report.json"),
            chart_dir: None,
            top_n: DEFAULT_TOP_N,
            delimiter: DEFAULT_DELIMITER,
            chart_config: None,
            print_summary: false,
        }
    }
}

/// Arguments for the ad-hoc aggregate command
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    pub input: PathBuf,

    /// Group key name, e.g. "country"
    pub by: String,

    /// Measure names, e.g. ["total_sales", "quantity"]
    pub measures: Vec<String>,

    /// "natural" or "desc:<measure>"
    pub order: String,

    /// Keep only the first N groups
    pub top: Option<usize>,

    pub delimiter: u8,

    /// Print the view as JSON instead of a table
    pub json: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            by: "product".to_string(),
            measures: vec!["total_sales".to_string()],
            order: "desc:total_sales".to_string(),
            top: None,
            delimiter: DEFAULT_DELIMITER,
            json: false,
        }
    }
}
