use crate::grid::RawGrid;
use crate::table::Table;
use indexmap::IndexMap;

/// Every sheet of a decoded workbook, in document order
#[derive(Debug, Clone, Default)]
pub struct RawBook {
    sheets: IndexMap<String, RawGrid>,
}

impl RawBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet
    pub fn insert(&mut self, name: &str, grid: RawGrid) {
        self.sheets.insert(name.to_string(), grid);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawGrid> {
        self.sheets.get(name)
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &RawGrid)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The cleaned tables of one workbook, keyed by sheet name (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct CleanedBook {
    sheets: IndexMap<String, Table>,
}

impl CleanedBook {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet
    pub fn insert(&mut self, name: &str, table: Table) {
        self.sheets.insert(name.to_string(), table);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.sheets.get(name)
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Table)> for CleanedBook {
    fn from_iter<I: IntoIterator<Item = (String, Table)>>(iter: I) -> Self {
        CleanedBook {
            sheets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_book_preserves_order() {
        let mut book = CleanedBook::new();
        book.insert("Zeta", Table::empty());
        book.insert("Alpha", Table::empty());
        assert_eq!(book.sheet_names(), vec!["Zeta", "Alpha"]);
        assert_eq!(book.sheet_count(), 2);
        assert!(book.get("Alpha").is_some());
    }

    #[test]
    fn test_raw_book_replace_keeps_position() {
        let mut book = RawBook::new();
        book.insert("One", RawGrid::default());
        book.insert("Two", RawGrid::default());
        book.insert("One", RawGrid::from_rows(vec![vec![1]]));
        assert_eq!(book.sheet_names(), vec!["One", "Two"]);
        assert_eq!(book.get("One").map(RawGrid::row_count), Some(1));
    }
}
