//! Duplicate record removal.

use crate::frame::{Frame, Record};
use std::cmp::Reverse;
use std::collections::HashSet;

fn record_key(record: &Record, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&col| record.cells[col].identity_key())
        .collect()
}

/// Collapse duplicate records on the given key columns.
///
/// Key names absent from the frame are ignored. With no usable key column,
/// records identical across every field are collapsed to their first
/// occurrence. Otherwise records are ranked by completeness (stable, so
/// equal scores keep document order) and the first record of each key
/// combination survives. Survivors are left in ranked order; the row tags
/// put them back in place when the frame is finished.
///
/// Returns the number of records removed.
pub(crate) fn deduplicate<S: AsRef<str>>(frame: &mut Frame, keys: &[S]) -> usize {
    let indices: Vec<usize> = keys
        .iter()
        .filter_map(|name| frame.column_index(name.as_ref()))
        .collect();

    if indices.is_empty() {
        tracing::debug!("no dedup key columns present, comparing whole rows");
        let all: Vec<usize> = (0..frame.col_count()).collect();
        let mut seen = HashSet::new();
        return frame.retain_records(|record| seen.insert(record_key(record, &all)));
    }

    frame.records.sort_by_key(|record| Reverse(record.completeness()));
    let mut seen = HashSet::new();
    frame.retain_records(|record| seen.insert(record_key(record, &indices)))
}
