//! Group-by / sum / sort over an in-memory record slice.
//!
//! `aggregate` is a pure function: it reads the records, builds a fresh
//! view and keeps no state between calls.

use super::view::{AggregateView, GroupKey, GroupRow, GroupValue, Measure, SortOrder};
use crate::derive::SaleRecord;
use crate::utils::error::AggregateError;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Group `records` by `group_key`, sum each of `measures`, and order the groups
///
/// **Public** - main entry point for every report view
///
/// # Arguments
/// * `records` - Full record set
/// * `group_key` - Field to group on; records without a value form their own group
/// * `measures` - Sums to compute, in output column order
/// * `order` - Descending by one of `measures`, or natural key order
///
/// # Errors
/// * `AggregateError::NoMeasures` - `measures` is empty
/// * `AggregateError::OrderMeasureNotRequested` - sort measure not in `measures`
/// * `AggregateError::EmptyInput` - `records` is empty
/// * `AggregateError::Overflow` - a group sum or the grand total leaves the decimal range
pub fn aggregate(
    records: &[SaleRecord],
    group_key: GroupKey,
    measures: &[Measure],
    order: SortOrder,
) -> Result<AggregateView, AggregateError> {
    if measures.is_empty() {
        return Err(AggregateError::NoMeasures);
    }

    let sort_slot = match order {
        SortOrder::Descending(measure) => Some(
            measures
                .iter()
                .position(|m| *m == measure)
                .ok_or_else(|| AggregateError::OrderMeasureNotRequested(measure.to_string()))?,
        ),
        SortOrder::Natural => None,
    };

    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    debug!(
        "Aggregating {} records by {} ({} measures, order {})",
        records.len(),
        group_key,
        measures.len(),
        order
    );

    // Groups are kept in first-encountered order; the index maps keys to slots
    let mut index: HashMap<GroupValue, usize> = HashMap::new();
    let mut groups: Vec<GroupRow> = Vec::new();
    // Measures are non-negative, so every partial sum of groups is bounded by
    // the grand total; checking it here keeps later totals overflow-free.
    let mut grand_totals = vec![Decimal::ZERO; measures.len()];

    for record in records {
        let key = group_key.value_of(record);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupRow::empty(key, measures.len()));
                groups.len() - 1
            }
        };

        let GroupRow { key, values, count } = &mut groups[slot];
        for ((value, grand), measure) in values.iter_mut().zip(grand_totals.iter_mut()).zip(measures) {
            let amount = measure.value_of(record);
            let overflow = || AggregateError::Overflow {
                group: key.label(),
                measure: measure.to_string(),
            };
            *value = value.checked_add(amount).ok_or_else(overflow)?;
            *grand = grand.checked_add(amount).ok_or_else(overflow)?;
        }
        *count += 1;
    }

    // sort_by is stable, so equal sums keep first-encountered order
    match sort_slot {
        Some(slot) => groups.sort_by(|a, b| b.values[slot].cmp(&a.values[slot])),
        None => groups.sort_by(|a, b| a.key.cmp(&b.key)),
    }

    debug!("Built {} groups", groups.len());

    Ok(AggregateView {
        group_key,
        measures: measures.to_vec(),
        order,
        groups,
    })
}
