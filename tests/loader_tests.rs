use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sales_insight::loader::{load_sales, parse_rows, read_table_from_reader};
use sales_insight::utils::error::{LoadError, ParseError};
use std::io::Write;
use tempfile::NamedTempFile;

const SALES: &str = "\
OrderDate,Product,Category,Country,Price,Quantity
2024-01-05,Laptop,Electronics,USA,899.99,1
2024-01-07,Mouse,Accessories,,19.50,4
2024-02-11 14:30:00,Desk,Furniture,NA,249.00,2
";

#[test]
fn test_missing_country_counted_and_rows_kept() {
    let table = read_table_from_reader(SALES.as_bytes(), b',').unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.missing.get("Country"), Some(2));
    assert_eq!(table.missing.get("Product"), Some(0));
    assert_eq!(table.missing.total(), 2);

    let sales = parse_rows(&table).unwrap();
    assert_eq!(sales.len(), 3);
    assert_eq!(sales[1].country, None);
    assert_eq!(sales[2].country, None);
    assert_eq!(sales[0].country.as_deref(), Some("USA"));
}

#[test]
fn test_typed_values() {
    let table = read_table_from_reader(SALES.as_bytes(), b',').unwrap();
    let sales = parse_rows(&table).unwrap();

    assert_eq!(sales[0].price, Decimal::new(89999, 2));
    assert_eq!(sales[1].quantity, 4);
    assert_eq!(sales[2].order_date, NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());
    assert_eq!(sales[2].row, 3);
}

#[test]
fn test_unparseable_date_aborts_load() {
    let data = "OrderDate,Product,Price,Quantity\n2024-01-05,A,10,1\nnot-a-date,B,10,1\n";
    let table = read_table_from_reader(data.as_bytes(), b',').unwrap();

    assert_eq!(
        parse_rows(&table).unwrap_err(),
        ParseError::InvalidDate {
            row: 2,
            value: "not-a-date".to_string(),
        }
    );
}

#[test]
fn test_missing_price_column() {
    let data = "OrderDate,Product,Quantity\n2024-01-05,A,1\n";
    let table = read_table_from_reader(data.as_bytes(), b',').unwrap();

    assert!(matches!(
        parse_rows(&table),
        Err(ParseError::MissingColumn(_))
    ));
}

#[test]
fn test_semicolon_delimiter_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date;Product;Unit Price;Qty").unwrap();
    writeln!(file, "2024-03-01;Lamp;45.5;2").unwrap();

    let loaded = load_sales(file.path(), b';').unwrap();
    assert_eq!(loaded.sales.len(), 1);
    assert_eq!(loaded.sales[0].price, Decimal::new(455, 1));
    assert!(!loaded.missing.has_missing());
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        load_sales("/no/such/sales.csv", b','),
        Err(LoadError::NotFound(_))
    ));
}
