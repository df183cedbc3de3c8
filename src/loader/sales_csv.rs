//! CSV reader for sales exports.
//!
//! Reads the file into a [`RawTable`], counting missing cells per column,
//! then parses the essential columns into typed [`RawSale`] rows.
//! Any unparseable date or number aborts the whole load.

use super::schema::{MissingValueReport, RawSale, RawTable};
use crate::utils::config::{
    CATEGORY_COLUMNS, COUNTRY_COLUMNS, DATETIME_FORMATS, DATE_FORMATS, NULL_TOKENS,
    ORDER_DATE_COLUMNS, PRICE_COLUMNS, PRODUCT_COLUMNS, QUANTITY_COLUMNS,
};
use crate::utils::error::{LoadError, ParseError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Typed rows plus the missing-value report gathered while reading them
#[derive(Debug, Clone)]
pub struct LoadedSales {
    pub sales: Vec<RawSale>,
    pub missing: MissingValueReport,
}

/// Column positions resolved from the header
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    order_date: usize,
    price: usize,
    quantity: usize,
    product: Option<usize>,
    category: Option<usize>,
    country: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, ParseError> {
        let required = |aliases: &[&str]| {
            find_column(headers, aliases)
                .ok_or_else(|| ParseError::MissingColumn(aliases[0].to_string()))
        };

        Ok(Self {
            order_date: required(ORDER_DATE_COLUMNS)?,
            price: required(PRICE_COLUMNS)?,
            quantity: required(QUANTITY_COLUMNS)?,
            product: find_column(headers, PRODUCT_COLUMNS),
            category: find_column(headers, CATEGORY_COLUMNS),
            country: find_column(headers, COUNTRY_COLUMNS),
        })
    }
}

/// Read a delimited file into a raw text table
///
/// # Errors
/// * `LoadError::NotFound` - path does not exist
/// * `LoadError::Unreadable` - file cannot be opened
/// * `LoadError::Csv` - malformed CSV framing or invalid UTF-8
pub fn read_table(path: impl AsRef<Path>, delimiter: u8) -> Result<RawTable, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    info!("Reading sales data from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    read_table_from_reader(file, delimiter)
}

/// Read CSV text from any reader
///
/// **Public** - used by tests and by callers holding in-memory data
pub fn read_table_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut missing = MissingValueReport::for_headers(&headers);
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;

        // Entirely blank lines are skipped by the csv crate; a row of only
        // delimiters still counts as a row with every cell missing.
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|i| record.get(i).and_then(normalize_cell))
            .collect();

        for (i, cell) in cells.iter().enumerate() {
            if cell.is_none() {
                missing.record_missing(i);
            }
        }

        rows.push(cells);
    }

    debug!("Read {} rows across {} columns", rows.len(), headers.len());

    Ok(RawTable {
        headers,
        rows,
        missing,
    })
}

/// Parse the raw table into typed sale rows
///
/// # Errors
/// * `ParseError::MissingColumn` - no OrderDate, Price or Quantity header
/// * `ParseError::MissingValue` - an essential cell is empty
/// * `ParseError::InvalidDate` / `ParseError::InvalidNumber` - unparseable cell
pub fn parse_rows(table: &RawTable) -> Result<Vec<RawSale>, ParseError> {
    let columns = ColumnMap::resolve(&table.headers)?;

    if columns.product.is_none() {
        warn!("No product column found; product reports will have a single missing group");
    }

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| parse_row(idx + 1, cells, &table.headers, &columns))
        .collect()
}

/// Read and parse in one call
pub fn load_sales(path: impl AsRef<Path>, delimiter: u8) -> Result<LoadedSales, LoadError> {
    let table = read_table(path, delimiter)?;
    let sales = parse_rows(&table)?;

    info!("Loaded {} sales rows", sales.len());

    Ok(LoadedSales {
        sales,
        missing: table.missing,
    })
}

fn parse_row(
    row: usize,
    cells: &[Option<String>],
    headers: &[String],
    columns: &ColumnMap,
) -> Result<RawSale, ParseError> {
    let required = |index: usize| {
        cells
            .get(index)
            .and_then(|c| c.as_deref())
            .ok_or_else(|| ParseError::MissingValue {
                row,
                column: headers[index].clone(),
            })
    };
    let optional = |index: Option<usize>| {
        index.and_then(|i| cells.get(i).cloned().flatten())
    };

    let date_text = required(columns.order_date)?;
    let order_date = parse_order_date(date_text).ok_or_else(|| ParseError::InvalidDate {
        row,
        value: date_text.to_string(),
    })?;

    let price_text = required(columns.price)?;
    let price = parse_decimal(price_text).ok_or_else(|| ParseError::InvalidNumber {
        row,
        column: headers[columns.price].clone(),
        value: price_text.to_string(),
    })?;

    let quantity_text = required(columns.quantity)?;
    let quantity = parse_quantity(quantity_text).ok_or_else(|| ParseError::InvalidNumber {
        row,
        column: headers[columns.quantity].clone(),
        value: quantity_text.to_string(),
    })?;

    Ok(RawSale {
        row,
        product: optional(columns.product),
        category: optional(columns.category),
        country: optional(columns.country),
        order_date,
        price,
        quantity,
    })
}

/// Parse an order date, keeping only the calendar date
///
/// Accepts RFC 3339 timestamps, ISO date-times and the date layouts
/// listed in `DATE_FORMATS`.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Integer text, or decimal text with a zero fraction ("3.0")
fn parse_quantity(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let d = parse_decimal(value)?;
    if d.fract().is_zero() {
        d.to_i64()
    } else {
        None
    }
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if NULL_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const SAMPLE: &str = "OrderDate,Product,Category,Country,Price,Quantity\n\
        2024-01-15,Laptop,Electronics,USA,899.99,2\n\
        2024-02-03 14:20:00,Mouse,Accessories,,25.50,4\n\
        02/28/2024,Desk,Furniture,NA,150,1\n";

    fn table(text: &str) -> RawTable {
        read_table_from_reader(text.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_read_table_counts_missing() {
        let table = table(SAMPLE);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.missing.get("Country"), Some(2));
        assert_eq!(table.missing.get("Product"), Some(0));
    }

    #[test]
    fn test_parse_rows() {
        let sales = parse_rows(&table(SAMPLE)).unwrap();

        assert_eq!(sales.len(), 3);
        assert_eq!(sales[0].row, 1);
        assert_eq!(sales[0].product.as_deref(), Some("Laptop"));
        assert_eq!(sales[0].price, Decimal::new(89999, 2));
        assert_eq!(sales[1].order_date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(sales[1].country, None);
        assert_eq!(sales[2].order_date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }

    #[test]
    fn test_header_aliases_case_insensitive() {
        let text = "order date;PRODUCTNAME;unitprice;QTY\n2024-03-01;Pen;1.25;10\n";
        let table = read_table_from_reader(text.as_bytes(), b';').unwrap();
        let sales = parse_rows(&table).unwrap();

        assert_eq!(sales[0].product.as_deref(), Some("Pen"));
        assert_eq!(sales[0].quantity, 10);
        assert_eq!(sales[0].category, None);
    }

    #[test]
    fn test_missing_date_column() {
        let text = "Product,Price,Quantity\nPen,1,1\n";
        let err = parse_rows(&table(text)).unwrap_err();
        assert_eq!(err, ParseError::MissingColumn("OrderDate".to_string()));
    }

    #[test]
    fn test_unparseable_date_aborts() {
        let text = "OrderDate,Price,Quantity\n2024-01-01,1,1\nnot-a-date,2,2\n";
        let err = parse_rows(&table(text)).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDate {
                row: 2,
                value: "not-a-date".to_string()
            }
        );
    }

    #[test]
    fn test_missing_price_value() {
        let text = "OrderDate,Price,Quantity\n2024-01-01,,1\n";
        let err = parse_rows(&table(text)).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                row: 1,
                column: "Price".to_string()
            }
        );
    }

    #[test]
    fn test_parse_quantity_variants() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("3.0"), Some(3));
        assert_eq!(parse_quantity("3.5"), None);
        assert_eq!(parse_quantity("three"), None);
    }

    #[test]
    fn test_parse_order_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(parse_order_date("2024-05-09"), Some(expected));
        assert_eq!(parse_order_date("2024/05/09"), Some(expected));
        assert_eq!(parse_order_date("05/09/2024"), Some(expected));
        assert_eq!(parse_order_date("09.05.2024"), Some(expected));
        assert_eq!(parse_order_date("2024-05-09T08:15:00"), Some(expected));
        assert_eq!(parse_order_date("2024-05-09T08:15:00.250"), Some(expected));
        assert_eq!(parse_order_date("2024-05-09T08:15:00+02:00"), Some(expected));
        assert_eq!(parse_order_date("2024-05-09 08:15"), Some(expected));
        assert_eq!(parse_order_date("2024-05-09T08:15"), Some(expected));
        assert_eq!(parse_order_date("05/09/2024 08:15"), Some(expected));
        assert_eq!(parse_order_date("05/09/2024 08:15:30"), Some(expected));
        assert_eq!(parse_order_date("May 9th"), None);
    }

    #[test]
    fn test_null_tokens() {
        assert_eq!(normalize_cell("  "), None);
        assert_eq!(normalize_cell("N/A"), None);
        assert_eq!(normalize_cell("nan"), None);
        assert_eq!(normalize_cell(" Canada "), Some("Canada".to_string()));
    }

    #[test]
    fn test_read_table_not_found() {
        let err = read_table("/definitely/not/here.csv", b',').unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
