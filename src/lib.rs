//! Sales Insight
//!
//! Aggregation and reporting for retail sales CSV files.
//!
//! The pipeline runs in stages over an immutable record set:
//!
//! - [`loader`] reads the CSV, counts missing values and parses typed rows
//! - [`derive`] computes total sales, order month and price tier
//! - [`aggregator`] groups records by one key and sums measures
//! - [`report`] assembles the named reports
//! - [`chart`] and [`output`] render and persist them
//!
//! ## Getting Started
//!
//! ```bash
//! sales-insight analyze --input sales.csv --output report.json --charts charts/
//! sales-insight aggregate --input sales.csv --by country --measure total_sales
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod derive;
pub mod loader;
pub mod output;
pub mod report;
pub mod utils;
