//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the input file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur while turning text cells into typed values.
///
/// Row numbers are 1-based data rows (the header is not counted).
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(String),

    #[error("Row {row}: required value '{column}' is missing")]
    MissingValue { row: usize, column: String },

    #[error("Row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: cannot parse {column} value '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Values outside the declared input domain
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Row {row}: negative price {price}")]
    NegativePrice { row: usize, price: Decimal },

    #[error("Row {row}: negative quantity {quantity}")]
    NegativeQuantity { row: usize, quantity: i64 },

    #[error("Row {row}: price {price} x quantity {quantity} exceeds the decimal range")]
    TotalOverflow {
        row: usize,
        price: Decimal,
        quantity: i64,
    },

    #[error("Invalid price tiers: {0}")]
    InvalidTiers(String),
}

/// Errors that can occur during aggregation
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Unknown group key '{0}' (expected product, category, country, month or price_category)")]
    InvalidGroupKey(String),

    #[error("Unknown measure '{0}' (expected total_sales or quantity)")]
    InvalidMeasure(String),

    #[error("Unknown sort order '{0}' (expected natural or desc:<measure>)")]
    InvalidOrder(String),

    #[error("At least one measure must be requested")]
    NoMeasures,

    #[error("Cannot sort by '{0}': measure was not requested")]
    OrderMeasureNotRequested(String),

    #[error("No records to aggregate")]
    EmptyInput,

    #[error("Sum of {measure} exceeds the decimal range (group '{group}')")]
    Overflow { group: String, measure: String },
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Report '{0}' has no data to chart")]
    EmptySeries(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// A failure anywhere in load -> derive -> aggregate, tagged with its stage
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("load stage failed: {0}")]
    Load(#[from] LoadError),

    #[error("derive stage failed: {0}")]
    Derive(#[from] ValidationError),

    #[error("aggregate stage failed: {0}")]
    Aggregate(#[from] AggregateError),
}

impl PipelineError {
    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Load(_) => "load",
            PipelineError::Derive(_) => "derive",
            PipelineError::Aggregate(_) => "aggregate",
        }
    }
}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        PipelineError::Load(LoadError::Parse(err))
    }
}
