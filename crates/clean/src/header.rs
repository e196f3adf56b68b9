//! Header row detection.
//!
//! Each of the first rows of a sheet is scored as a header candidate:
//!
//! ```text
//! score = 3 * header_like + unique_vals - 2 * numeric_cells - id_like_cells + position_bonus
//! ```
//!
//! where `position_bonus = max(0, 10 - row_index)`. The highest score wins;
//! ties go to the earlier row.

use crate::classify::is_header_like;
use crate::options::DEFAULT_HEADER_SCAN_ROWS;
use sheethub_sheet::{CellValue, RawGrid};
use std::collections::HashSet;

const POSITION_BONUS_ROWS: i64 = 10;

/// Header-candidate score of one row. Higher means more label-like.
#[must_use]
pub fn score_row(row: &[CellValue], row_index: usize) -> i64 {
    let values: Vec<String> = row
        .iter()
        .filter(|cell| !cell.is_missing())
        .map(CellValue::render)
        .collect();

    let header_like = row.iter().filter(|cell| is_header_like(cell)).count() as i64;
    let unique_vals = values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len() as i64;
    let numeric_cells = values.iter().filter(|v| is_digit_run(v)).count() as i64;
    let id_like_cells = values
        .iter()
        .filter(|v| {
            v.chars().any(|ch| ch.is_ascii_digit()) && v.chars().any(|ch| ch.is_ascii_alphabetic())
        })
        .count() as i64;
    let position_bonus =
        (POSITION_BONUS_ROWS - row_index.min(POSITION_BONUS_ROWS as usize) as i64).max(0);

    3 * header_like + unique_vals - 2 * numeric_cells - id_like_cells + position_bonus
}

/// Digits only, once thousands separators and decimal points are removed
fn is_digit_run(value: &str) -> bool {
    let stripped: String = value.chars().filter(|ch| !matches!(ch, '.' | ',')).collect();
    !stripped.is_empty() && stripped.chars().all(|ch| ch.is_ascii_digit())
}

/// Zero-based index of the most likely header row within the first 20 rows.
#[must_use]
pub fn detect_header_row(grid: &RawGrid) -> usize {
    detect_header_row_within(grid, DEFAULT_HEADER_SCAN_ROWS)
}

/// Like [`detect_header_row`] with an explicit scan window.
///
/// Returns 0 when no row in the window holds a value.
#[must_use]
pub fn detect_header_row_within(grid: &RawGrid, scan_rows: usize) -> usize {
    let mut best_row = 0;
    let mut best_score: Option<i64> = None;

    for (index, row) in grid.rows().take(scan_rows).enumerate() {
        if row.iter().all(CellValue::is_missing) {
            continue;
        }
        let score = score_row(row, index);
        match best_score {
            Some(best) if score <= best => {}
            _ => {
                best_score = Some(score);
                best_row = index;
            }
        }
    }

    best_row
}
