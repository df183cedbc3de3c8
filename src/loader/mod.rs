//! Sales data loading.
//!
//! This module handles:
//! - Reading delimited files into a text table
//! - Counting missing values per column
//! - Parsing order dates, prices and quantities

pub mod sales_csv;
pub mod schema;

// Re-export main types
pub use sales_csv::{
    load_sales, parse_order_date, parse_rows, read_table, read_table_from_reader, LoadedSales,
};
pub use schema::{ColumnMissing, MissingValueReport, RawSale, RawTable};
