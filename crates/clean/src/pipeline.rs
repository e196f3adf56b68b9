//! Per-sheet and per-workbook orchestration of the cleaning stages.

use crate::dedupe::deduplicate;
use crate::error::CleanResult;
use crate::frame::Frame;
use crate::header::detect_header_row_within;
use crate::junk::drop_junk_columns;
use crate::normalize::normalize;
use crate::options::CleanOptions;
use crate::standardize::standardize_column_names;
use crate::summary::remove_summary_rows;
use crate::CleanError;
use sheethub_sheet::{CleanedBook, RawBook, RawGrid, Table};

/// What happened to one sheet on its way through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    /// `None` when the raw sheet held no values at all.
    pub header_row: Option<usize>,
    /// Records left after normalization.
    pub body_rows: usize,
    pub summary_rows_removed: usize,
    pub junk_columns_removed: Vec<String>,
    pub duplicates_removed: usize,
    pub incomplete_rows_removed: usize,
    pub rows: usize,
    pub columns: usize,
}

/// A finished table plus its report.
#[derive(Debug, Clone)]
pub struct CleanedSheet {
    pub table: Table,
    pub report: SheetReport,
}

/// A sheet that could not be cleaned. Its siblings are unaffected.
#[derive(Debug)]
pub struct SheetFailure {
    pub sheet: String,
    pub error: CleanError,
}

/// Result of cleaning a whole workbook.
#[derive(Debug, Default)]
pub struct CleanOutcome {
    pub book: CleanedBook,
    pub reports: Vec<SheetReport>,
    pub failures: Vec<SheetFailure>,
}

/// Clean one raw sheet.
pub fn clean_sheet(
    grid: &RawGrid,
    sheet: &str,
    options: &CleanOptions,
) -> CleanResult<CleanedSheet> {
    let mut report = SheetReport {
        sheet: sheet.to_string(),
        ..SheetReport::default()
    };
    if grid.is_empty() {
        return Ok(CleanedSheet {
            table: Table::empty(),
            report,
        });
    }

    let header_row = detect_header_row_within(grid, options.header_scan_rows);
    report.header_row = Some(header_row);

    let mut frame = normalize(grid, header_row);
    report.body_rows = frame.row_count();

    if options.standardize {
        standardize(&mut frame);
    }
    if options.filter_summaries {
        report.summary_rows_removed = remove_summary_rows(&mut frame, &options.summary_keywords);
    }
    report.junk_columns_removed = drop_junk_columns(&mut frame, options.junk_numeric_ratio);
    if options.dedupe {
        report.duplicates_removed = deduplicate(&mut frame, options.dedup_keys_for(sheet));
    }
    if options.drop_incomplete {
        report.incomplete_rows_removed =
            frame.retain_records(|r| r.cells.iter().all(|cell| !cell.is_missing()));
    }

    let table = frame.into_table()?;
    report.rows = table.row_count();
    report.columns = table.col_count();

    tracing::debug!(
        sheet,
        header_row,
        body_rows = report.body_rows,
        summary_rows_removed = report.summary_rows_removed,
        junk_columns_removed = report.junk_columns_removed.len(),
        duplicates_removed = report.duplicates_removed,
        incomplete_rows_removed = report.incomplete_rows_removed,
        rows = report.rows,
        columns = report.columns,
        "cleaned sheet"
    );

    Ok(CleanedSheet { table, report })
}

fn standardize(frame: &mut Frame) {
    let names = standardize_column_names(&frame.column_names());
    for (column, name) in frame.columns.iter_mut().zip(names) {
        column.name = name;
    }
}

/// Clean every sheet of a decoded workbook independently.
///
/// A sheet that fails is reported in [`CleanOutcome::failures`] and left out
/// of the book; the other sheets are still cleaned.
pub fn clean_book(raw: &RawBook, options: &CleanOptions) -> CleanResult<CleanOutcome> {
    options.validate()?;

    let mut outcome = CleanOutcome::default();
    for (name, grid) in raw.sheets() {
        match clean_sheet(grid, name, options) {
            Ok(cleaned) => {
                outcome.book.insert(name, cleaned.table);
                outcome.reports.push(cleaned.report);
            }
            Err(error) => {
                tracing::warn!(sheet = name, error = %error, "sheet could not be cleaned");
                outcome.failures.push(SheetFailure {
                    sheet: name.to_string(),
                    error,
                });
            }
        }
    }
    Ok(outcome)
}

/// Decode spreadsheet bytes and clean every sheet, keeping per-sheet reports.
///
/// # Errors
///
/// `CleanError::Decode` when the bytes are not a readable spreadsheet, and
/// `CleanError::Config` for invalid options. No partial output is produced.
pub fn clean_workbook_detailed(bytes: &[u8], options: &CleanOptions) -> CleanResult<CleanOutcome> {
    options.validate()?;
    let raw = RawBook::from_bytes(bytes)?;
    clean_book(&raw, options)
}

/// Decode spreadsheet bytes and return the cleaned tables.
///
/// # Errors
///
/// Same as [`clean_workbook_detailed`].
pub fn clean_workbook(bytes: &[u8], options: &CleanOptions) -> CleanResult<CleanedBook> {
    Ok(clean_workbook_detailed(bytes, options)?.book)
}

/// Serialize cleaned tables as a formatted xlsx document.
///
/// # Errors
///
/// `CleanError::Serialization` if the writer rejects the content.
pub fn serialize_workbook(book: &CleanedBook) -> CleanResult<Vec<u8>> {
    Ok(sheethub_sheet::serialize_workbook(book)?)
}
