use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::HashSet;

/// A labeled table: unique column names plus rectangular rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, checking that names are unique and every row is
    /// exactly as wide as the header.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::DuplicateColumnName` or `SheetError::LengthMismatch`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(SheetError::DuplicateColumnName { name: name.clone() });
            }
        }
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(SheetError::LengthMismatch {
                expected: columns.len(),
                actual: row.len(),
            });
        }
        Ok(Table { columns, rows })
    }

    /// Build a table from string-ish headers and convertible rows
    ///
    /// # Errors
    ///
    /// Same as [`Table::new`].
    pub fn from_data<S, T>(columns: Vec<S>, rows: Vec<Vec<T>>) -> Result<Self>
    where
        S: Into<String>,
        T: Into<CellValue>,
    {
        Self::new(
            columns.into_iter().map(Into::into).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// A zero-row, zero-column table
    #[must_use]
    pub fn empty() -> Self {
        Table::default()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows and no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the named column, top to bottom
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Count of missing fields across the whole table
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_missing())
            .count()
    }
}
