//! Chart rendering for reports.
//!
//! This module converts reports into standalone SVG charts and terminal
//! tables. It only reads reports; no aggregation happens here.

pub mod generator;

// Re-export main types
pub use generator::{format_amount, render_chart, render_text_summary, ChartConfig};
