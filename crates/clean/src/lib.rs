//! Cleaning pipeline for messy spreadsheet exports
//!
//! Locates the real header row in a raw sheet, then runs a fixed,
//! order-preserving sequence of stages over the labeled rows:
//!
//! 1. normalization (empty rows and columns dropped, unusable labels replaced)
//! 2. column name standardization
//! 3. summary row filtering
//! 4. junk column elimination
//! 5. deduplication, most complete record first
//! 6. removal of incomplete records
//!
//! Records keep a private tag with their original position, so the
//! returned tables are always in document order.
//!
//! # Examples
//!
//! ```
//! use sheethub_clean::{clean_sheet, CleanOptions};
//! use sheethub_sheet::{CellValue, RawGrid};
//!
//! let grid = RawGrid::from(vec![
//!     vec![CellValue::from("Payroll export")],
//!     vec!["Employee ID".into(), "Name".into(), "Salary".into()],
//!     vec!["EMP-001".into(), "Alice".into(), CellValue::Int(50000)],
//!     vec!["Total".into(), CellValue::Null, CellValue::Int(50000)],
//! ]);
//!
//! let cleaned = clean_sheet(&grid, "Payroll", &CleanOptions::default()).unwrap();
//! assert_eq!(cleaned.table.column_names(), ["employee_id", "name", "salary"]);
//! assert_eq!(cleaned.table.row_count(), 1);
//! ```

mod classify;
mod dedupe;
mod error;
mod frame;
mod header;
mod junk;
mod normalize;
mod options;
mod pipeline;
mod standardize;
mod summary;

pub use classify::is_header_like;
pub use error::{CleanError, CleanResult, ErrorKind};
pub use header::{detect_header_row, detect_header_row_within, score_row};
pub use options::{
    parse_keywords, CleanOptions, DEFAULT_DEDUP_KEY, DEFAULT_HEADER_SCAN_ROWS,
    DEFAULT_JUNK_NUMERIC_RATIO, DEFAULT_SUMMARY_KEYWORDS,
};
pub use pipeline::{
    clean_book, clean_sheet, clean_workbook, clean_workbook_detailed, serialize_workbook,
    CleanOutcome, CleanedSheet, SheetFailure, SheetReport,
};
pub use standardize::{make_unique, standardize_column_names, standardize_name};
