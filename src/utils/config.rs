//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of groups kept by "top N" reports
pub const DEFAULT_TOP_N: usize = 10;
pub const MAX_TOP_N: usize = 1000;

/// Default CSV delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

// Header aliases, matched case-insensitively after trimming.
// Exports from different tools spell these columns differently.
pub const ORDER_DATE_COLUMNS: &[&str] = &["OrderDate", "Order Date", "order_date", "Date"];
pub const PRICE_COLUMNS: &[&str] = &["Price", "Unit Price", "UnitPrice", "unit_price"];
pub const QUANTITY_COLUMNS: &[&str] = &["Quantity", "Qty"];
pub const PRODUCT_COLUMNS: &[&str] = &["Product", "ProductName", "product_name"];
pub const CATEGORY_COLUMNS: &[&str] = &["Category"];
pub const COUNTRY_COLUMNS: &[&str] = &["Country"];

/// Cell values treated as missing (case-insensitive, after trim)
pub const NULL_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "-"];

// Timestamp layouts tried in order; only the calendar date is kept.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Label of the group holding records with no value for the group key
pub const MISSING_GROUP_LABEL: &str = "(missing)";

/// Label of the group holding records outside every price bin
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";

// Chart geometry
pub const DEFAULT_CHART_WIDTH: usize = 800;
pub const DEFAULT_CHART_HEIGHT: usize = 600;
pub const MIN_CHART_WIDTH: usize = 200;
