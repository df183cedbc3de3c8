//! Ad-hoc aggregate command: one group key, any measures, any ordering.

use super::models::AggregateArgs;
use crate::aggregator::{aggregate, AggregateView, GroupKey, Measure, SortOrder};
use crate::derive::{derive_records, PriceTiers};
use crate::loader::load_sales;
use crate::utils::config::MAX_TOP_N;
use crate::utils::error::PipelineError;
use anyhow::{Context, Result};
use log::info;

/// Execute the aggregate command
///
/// Prints the view to stdout and returns it.
pub fn execute_aggregate(args: AggregateArgs) -> Result<AggregateView> {
    let group_key: GroupKey = args.by.parse()?;
    let measures = args
        .measures
        .iter()
        .map(|m| m.parse::<Measure>())
        .collect::<Result<Vec<_>, _>>()?;
    let order: SortOrder = args.order.parse()?;

    info!(
        "Aggregating {} by {} ({})",
        args.input.display(),
        group_key.as_str(),
        args.order
    );

    let loaded = load_sales(&args.input, args.delimiter)
        .map_err(PipelineError::from)
        .context("Failed to load sales data")?;
    let records = derive_records(&loaded.sales, &PriceTiers::standard())
        .map_err(PipelineError::from)
        .context("Failed to derive sale records")?;

    let mut view = aggregate(&records, group_key, &measures, order).map_err(PipelineError::from)?;
    if let Some(n) = args.top {
        view = view.top(n);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", format_view(&view));
    }

    Ok(view)
}

/// Plain table: label column followed by one column per measure and the row count
pub fn format_view(view: &AggregateView) -> String {
    let label_width = view
        .groups
        .iter()
        .map(|g| g.key.label().chars().count())
        .chain(std::iter::once(view.group_key.as_str().len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<width$}", view.group_key.as_str(), width = label_width);
    for measure in &view.measures {
        out.push_str(&format!("  {:>16}", measure.as_str()));
    }
    out.push_str(&format!("  {:>8}\n", "records"));

    for group in &view.groups {
        out.push_str(&format!("{:<width$}", group.key.label(), width = label_width));
        for value in &group.values {
            out.push_str(&format!("  {:>16}", value.round_dp(2).to_string()));
        }
        out.push_str(&format!("  {:>8}\n", group.count));
    }

    out
}

/// Validate aggregate arguments before loading anything
pub fn validate_aggregate_args(args: &AggregateArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.measures.is_empty() {
        anyhow::bail!("At least one measure is required");
    }

    if let Some(top) = args.top {
        if top == 0 || top > MAX_TOP_N {
            anyhow::bail!("top must be between 1 and {}", MAX_TOP_N);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::GroupValue;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sales_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "OrderDate,Product,Country,Price,Quantity").unwrap();
        writeln!(file, "2024-01-05,A,USA,50,2").unwrap();
        writeln!(file, "2024-01-20,B,UK,150,1").unwrap();
        writeln!(file, "2024-02-03,A,USA,50,3").unwrap();
        file
    }

    #[test]
    fn test_execute_aggregate_by_country() {
        let input = sales_file();
        let args = AggregateArgs {
            input: input.path().to_path_buf(),
            by: "country".to_string(),
            measures: vec!["total_sales".to_string(), "quantity".to_string()],
            ..Default::default()
        };

        let view = execute_aggregate(args).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.groups[0].key, GroupValue::Text("USA".to_string()));
        assert_eq!(view.groups[0].values, vec![Decimal::from(250), Decimal::from(5)]);
        assert_eq!(view.groups[0].count, 2);
    }

    #[test]
    fn test_execute_aggregate_rejects_unknown_key() {
        let input = sales_file();
        let args = AggregateArgs {
            input: input.path().to_path_buf(),
            by: "region".to_string(),
            ..Default::default()
        };
        assert!(execute_aggregate(args).is_err());
    }

    #[test]
    fn test_format_view_has_header_and_rows() {
        let input = sales_file();
        let args = AggregateArgs {
            input: input.path().to_path_buf(),
            by: "month".to_string(),
            order: "natural".to_string(),
            ..Default::default()
        };
        let view = execute_aggregate(args).unwrap();
        let table = format_view(&view);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("month"));
        assert!(lines[1].starts_with("2024-01"));
        assert!(lines[2].starts_with("2024-02"));
    }

    #[test]
    fn test_validate_aggregate_args() {
        let input = sales_file();
        let mut args = AggregateArgs {
            input: input.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_aggregate_args(&args).is_ok());

        args.top = Some(0);
        assert!(validate_aggregate_args(&args).is_err());

        args.top = None;
        args.measures.clear();
        assert!(validate_aggregate_args(&args).is_err());
    }
}
