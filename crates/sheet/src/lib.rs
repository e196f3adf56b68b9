//! Sheet model for sheethub
//!
//! Holds the value types every cleaning stage works on, plus the two
//! spreadsheet boundaries: decoding raw workbook bytes into [`RawBook`]
//! grids and serializing a [`CleanedBook`] back into a formatted xlsx file.
//!
//! # Examples
//!
//! ## Building a raw grid
//!
//! ```
//! use sheethub_sheet::{CellValue, RawGrid};
//!
//! let grid = RawGrid::from_rows(vec![
//!     vec![CellValue::from("Name"), CellValue::from("Salary")],
//!     vec![CellValue::from("Alice"), CellValue::Int(50000)],
//! ]);
//!
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.width(), 2);
//! ```
//!
//! ## Exporting a cleaned book
//!
//! ```
//! use sheethub_sheet::{serialize_workbook, CleanedBook, Table};
//!
//! let mut book = CleanedBook::new();
//! book.insert(
//!     "Staff",
//!     Table::from_data(vec!["name", "salary"], vec![vec!["Alice", "50000"]]).unwrap(),
//! );
//!
//! let bytes = serialize_workbook(&book).unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod book;
mod cell;
mod error;
mod grid;
mod table;
mod xlsx;

/// Re-export book types.
pub use book::{CleanedBook, RawBook};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export raw grid type.
pub use grid::RawGrid;
/// Re-export table type.
pub use table::Table;
/// Re-export xlsx export entry points.
pub use xlsx::{serialize_workbook, sheet_label, MAX_SHEET_NAME_LEN, MIN_COLUMN_WIDTH};
