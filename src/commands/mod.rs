//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use aggregate::{execute_aggregate, format_view, validate_aggregate_args};
pub use analyze::{execute_analyze, validate_args};
pub use models::{AggregateArgs, AnalyzeArgs};
pub use utils::{display_schema, display_version, validate_report_file};
