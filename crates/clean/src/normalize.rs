//! Carve a labeled frame out of a raw grid.

use crate::frame::{Column, Frame};
use crate::standardize::make_unique;
use sheethub_sheet::{CellValue, RawGrid};

/// Build the working frame for a sheet whose header sits at `header_row`.
///
/// Rows below the header become records tagged with their position.
/// Columns empty across the whole body and rows empty across every column
/// are dropped until neither pass removes anything. Blank or `Unnamed...`
/// labels become `column_<index>`, and repeated labels are made unique.
pub(crate) fn normalize(grid: &RawGrid, header_row: usize) -> Frame {
    let width = grid.width();
    let body: Vec<Vec<CellValue>> = grid
        .rows()
        .skip(header_row.saturating_add(1))
        .map(|row| (0..width).map(|c| row.get(c).cloned().unwrap_or_default()).collect())
        .collect();
    if body.is_empty() {
        return Frame::default();
    }

    let mut sources: Vec<usize> = (0..width).collect();
    let mut frame = Frame::new(vec![Column::named(String::new()); width], body);

    loop {
        let keep: Vec<bool> = (0..frame.col_count())
            .map(|c| frame.column_values(c).any(|cell| !cell.is_missing()))
            .collect();
        let mut flags = keep.iter();
        sources.retain(|_| *flags.next().unwrap_or(&true));
        let columns_removed = frame.retain_columns(&keep);
        let rows_removed = frame.retain_records(|r| !r.is_blank());
        if columns_removed == 0 && rows_removed == 0 {
            break;
        }
    }

    if frame.row_count() == 0 || frame.col_count() == 0 {
        return Frame::default();
    }

    let mut synthetic = Vec::with_capacity(frame.col_count());
    let labels: Vec<String> = sources
        .iter()
        .enumerate()
        .map(|(position, &source)| {
            let label = grid.cell(header_row, source).render().trim().to_string();
            if label.is_empty() || label.to_lowercase().starts_with("unnamed") {
                synthetic.push(true);
                format!("column_{position}")
            } else {
                synthetic.push(false);
                label
            }
        })
        .collect();

    frame.columns = make_unique(labels)
        .into_iter()
        .zip(synthetic)
        .map(|(name, is_synthetic)| {
            if is_synthetic {
                Column::synthetic(name)
            } else {
                Column::named(name)
            }
        })
        .collect();

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| if v.is_empty() { CellValue::Null } else { CellValue::from(*v) })
            .collect()
    }

    #[test]
    fn test_no_body_gives_empty_frame() {
        let grid = RawGrid::from(vec![cells(&["Name", "Age"])]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame.row_count(), 0);
        assert_eq!(frame.col_count(), 0);
    }

    #[test]
    fn test_drops_empty_columns_before_labeling() {
        let grid = RawGrid::from(vec![
            cells(&["Name", "Spacer", "Age"]),
            cells(&["Alice", "", "30"]),
            cells(&["Bob", "", "25"]),
        ]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame.column_names(), vec!["Name", "Age"]);
        assert_eq!(frame.records[1].cells, cells(&["Bob", "25"]));
    }

    #[test]
    fn test_row_order_assigned_before_dropping_blank_rows() {
        let grid = RawGrid::from(vec![
            cells(&["Name"]),
            cells(&["Alice"]),
            cells(&[""]),
            cells(&["Bob"]),
        ]);
        let frame = normalize(&grid, 0);
        let orders: Vec<usize> = frame.records.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 2]);
    }

    #[test]
    fn test_blank_and_unnamed_labels_are_synthesized() {
        let grid = RawGrid::from(vec![
            cells(&["", "Name", "Unnamed: 2", "  "]),
            cells(&["1", "Alice", "x", "y"]),
        ]);
        let frame = normalize(&grid, 0);
        assert_eq!(
            frame.column_names(),
            vec!["column_0", "Name", "column_2", "column_3"]
        );
        let flags: Vec<bool> = frame.columns.iter().map(|c| c.synthetic).collect();
        assert_eq!(flags, vec![true, false, true, true]);
    }

    #[test]
    fn test_synthetic_index_counts_retained_columns() {
        let grid = RawGrid::from(vec![
            cells(&["Name", "Gone", ""]),
            cells(&["Alice", "", "7"]),
        ]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame.column_names(), vec!["Name", "column_1"]);
    }

    #[test]
    fn test_duplicate_labels_made_unique() {
        let grid = RawGrid::from(vec![cells(&["Name", "Name", " Name "]), cells(&["a", "b", "c"])]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame.column_names(), vec!["Name", "Name_1", "Name_2"]);
    }

    #[test]
    fn test_all_blank_body_is_empty() {
        let grid = RawGrid::from(vec![cells(&["Name", "Age"]), cells(&["", ""]), vec![]]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame, Frame::default());
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = RawGrid::from(vec![
            cells(&["A", "B", "C"]),
            cells(&["1"]),
            cells(&["2", "", "z"]),
        ]);
        let frame = normalize(&grid, 0);
        assert_eq!(frame.column_names(), vec!["A", "C"]);
        assert_eq!(frame.records[0].cells, vec![CellValue::from("1"), CellValue::Null]);
    }
}
