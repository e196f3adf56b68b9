use crate::cell::CellValue;

static NULL: CellValue = CellValue::Null;

/// An unlabeled grid of cells exactly as read from one sheet.
///
/// Rows may be ragged; cells past the end of a row read as `Null`.
/// The grid is never mutated once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    /// Create a grid from row-major data
    #[must_use]
    pub fn from_rows<T: Into<CellValue>>(rows: Vec<Vec<T>>) -> Self {
        RawGrid {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when no cell anywhere holds a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(CellValue::is_missing)
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at `(row, col)`, `Null` when outside the stored data
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&NULL)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl From<Vec<Vec<CellValue>>> for RawGrid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        RawGrid { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_read_as_null() {
        let grid = RawGrid::from_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.cell(1, 2), &CellValue::Null);
        assert_eq!(grid.cell(9, 9), &CellValue::Null);
        assert_eq!(grid.cell(1, 0), &CellValue::from("d"));
    }

    #[test]
    fn test_blank_grid_is_empty() {
        let grid = RawGrid::from(vec![
            vec![CellValue::Null, CellValue::from("  ")],
            vec![],
        ]);
        assert!(grid.is_empty());
        assert!(RawGrid::default().is_empty());
        assert!(!RawGrid::from_rows(vec![vec![1]]).is_empty());
    }
}
