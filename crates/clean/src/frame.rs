//! Working table shared by the cleaning stages.
//!
//! Records carry their original document position so stages are free to
//! drop or reorder them; [`Frame::into_table`] restores that order and
//! strips the tag.

use sheethub_sheet::{CellValue, Result, Table};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub name: String,
    /// Name was generated because the header cell was blank or a placeholder.
    pub synthetic: bool,
}

impl Column {
    pub fn named(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            synthetic: false,
        }
    }

    pub fn synthetic(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            synthetic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub order: usize,
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_missing)
    }

    /// Count of non-missing fields
    pub fn completeness(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_missing()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Frame {
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl Frame {
    /// Build a frame, tagging rows with their position
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Self {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(order, cells)| Record { order, cells })
            .collect();
        Frame { columns, records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Keep records matching the predicate. Returns the number removed.
    pub fn retain_records<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&Record) -> bool,
    {
        let before = self.records.len();
        self.records.retain(predicate);
        before - self.records.len()
    }

    /// Keep the columns whose entry in `keep` is true. Returns the number removed.
    pub fn retain_columns(&mut self, keep: &[bool]) -> usize {
        debug_assert_eq!(keep.len(), self.columns.len());
        let before = self.columns.len();

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for record in &mut self.records {
            let mut flags = keep.iter();
            record.cells.retain(|_| *flags.next().unwrap_or(&true));
        }

        before - self.columns.len()
    }

    /// Iterate the values of one column, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.records.iter().map(move |r| &r.cells[index])
    }

    /// Restore document order, drop the row tags and hand back a public table
    pub fn into_table(mut self) -> Result<Table> {
        self.records.sort_by_key(|r| r.order);
        Table::new(
            self.columns.into_iter().map(|c| c.name).collect(),
            self.records.into_iter().map(|r| r.cells).collect(),
        )
    }
}

#[cfg(test)]
pub(crate) fn frame_of(names: &[&str], rows: Vec<Vec<CellValue>>) -> Frame {
    Frame::new(names.iter().map(|n| Column::named(*n)).collect(), rows)
}
