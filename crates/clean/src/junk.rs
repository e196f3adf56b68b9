//! Removal of exporter noise columns.

use crate::frame::Frame;

/// Drop synthetic columns that are entirely missing or mostly numeric.
///
/// Only columns whose name was generated by the normalizer are examined; a
/// column with a real header is never dropped here. A synthetic column goes
/// when the share of its non-missing values that parse as numbers is at
/// least `numeric_ratio`. Returns the names of the dropped columns.
pub(crate) fn drop_junk_columns(frame: &mut Frame, numeric_ratio: f64) -> Vec<String> {
    let keep: Vec<bool> = frame
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            if !column.synthetic {
                return true;
            }
            let (present, numeric) = frame
                .column_values(index)
                .filter(|cell| !cell.is_missing())
                .fold((0usize, 0usize), |(present, numeric), cell| {
                    (present + 1, numeric + usize::from(cell.is_numeric()))
                });
            present > 0 && (numeric as f64 / present as f64) < numeric_ratio
        })
        .collect();

    let dropped: Vec<String> = frame
        .columns
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| !**keep)
        .map(|(column, _)| column.name.clone())
        .collect();
    frame.retain_columns(&keep);
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Column, Frame};
    use sheethub_sheet::CellValue;

    fn frame(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Frame {
        Frame::new(columns, rows)
    }

    #[test]
    fn test_numeric_synthetic_column_dropped() {
        let mut f = frame(
            vec![Column::named("name"), Column::synthetic("column_3")],
            vec![
                vec!["Alice".into(), CellValue::Int(1)],
                vec!["Bob".into(), CellValue::Float(2.0)],
                vec!["Cara".into(), "3".into()],
            ],
        );
        assert_eq!(drop_junk_columns(&mut f, 0.8), vec!["column_3"]);
        assert_eq!(f.column_names(), vec!["name"]);
        assert_eq!(f.records[2].cells, vec![CellValue::from("Cara")]);
    }

    #[test]
    fn test_named_numeric_column_kept() {
        let mut f = frame(
            vec![Column::named("salary")],
            vec![vec![CellValue::Int(50000)], vec![CellValue::Int(60000)]],
        );
        assert!(drop_junk_columns(&mut f, 0.8).is_empty());
        assert_eq!(f.column_names(), vec!["salary"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 4 of 5 values numeric: exactly 0.8
        let rows = vec![
            vec![CellValue::Int(1)],
            vec![CellValue::Int(2)],
            vec![CellValue::Int(3)],
            vec![CellValue::Int(4)],
            vec!["note".into()],
        ];
        let mut f = frame(vec![Column::synthetic("column_0")], rows.clone());
        assert_eq!(drop_junk_columns(&mut f, 0.8).len(), 1);

        let mut f = frame(vec![Column::synthetic("column_0")], rows);
        assert!(drop_junk_columns(&mut f, 0.9).is_empty());
    }

    #[test]
    fn test_mostly_text_synthetic_column_kept() {
        let mut f = frame(
            vec![Column::synthetic("column_1")],
            vec![vec!["north".into()], vec!["south".into()], vec![CellValue::Null]],
        );
        assert!(drop_junk_columns(&mut f, 0.8).is_empty());
    }

    #[test]
    fn test_all_missing_synthetic_column_dropped() {
        let mut f = frame(
            vec![Column::named("id"), Column::synthetic("column_1")],
            vec![vec!["a".into(), CellValue::Null], vec!["b".into(), " ".into()]],
        );
        assert_eq!(drop_junk_columns(&mut f, 0.8), vec!["column_1"]);
    }
}
