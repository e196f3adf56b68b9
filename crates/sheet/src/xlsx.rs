use crate::book::{CleanedBook, RawBook};
use crate::cell::{parse_date, CellValue};
use crate::error::{Result, SheetError};
use crate::grid::RawGrid;
use crate::table::Table;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use indexmap::IndexMap;
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatAlign, Workbook, Worksheet};
use std::io::Cursor;
use std::path::Path;

/// Longest sheet name the xlsx format accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Narrowest column width written by the serializer
pub const MIN_COLUMN_WIDTH: usize = 10;

const MAX_COLUMN_WIDTH: usize = 255;
const HEADER_FILL: u32 = 0x00FF_F2CC;
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt.date()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => {
            parse_date(s).map_or_else(|| CellValue::String(s.clone()), CellValue::Date)
        }
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

impl RawBook {
    /// Decode every sheet of a spreadsheet held in memory.
    ///
    /// Any container calamine recognizes is accepted (xlsx, xlsm, xlsb, xls, ods).
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Decode` if the bytes are not a readable
    /// spreadsheet or any of its sheets fails to decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(SheetError::decode)?;

        let mut book = RawBook::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(SheetError::decode)?;

            // Ranges start at the first used cell; pad back to A1 so row
            // indices match the document.
            let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
            let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset as usize];
            for row in range.rows() {
                let mut row_data = vec![CellValue::Null; col_offset as usize];
                row_data.extend(row.iter().map(data_to_cell_value));
                data.push(row_data);
            }

            tracing::debug!(sheet = %sheet_name, rows = data.len(), "decoded sheet");
            book.insert(&sheet_name, RawGrid::from(data));
        }

        Ok(book)
    }

    /// Decode a spreadsheet file
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Io` if the file cannot be read, or
    /// `SheetError::Decode` as for [`RawBook::from_bytes`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

/// Output label for a sheet name: forbidden characters replaced, truncated
/// to [`MAX_SHEET_NAME_LEN`] characters, `Sheet1` when blank.
#[must_use]
pub fn sheet_label(name: &str) -> String {
    if name.trim().is_empty() {
        return "Sheet1".to_string();
    }
    let mut label: Vec<char> = name
        .chars()
        .map(|ch| match ch {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if label.first() == Some(&'\'') {
        label[0] = '_';
    }
    if let Some(last) = label.last_mut() {
        if *last == '\'' {
            *last = '_';
        }
    }
    label.into_iter().collect()
}

/// Write a cleaned book as a formatted xlsx document.
///
/// Sheet names that collide after [`sheet_label`] are last-write-wins: the
/// later table replaces the earlier one at the earlier one's position.
/// Excel compares sheet names case-insensitively, so `Data` and `DATA`
/// collide as well.
///
/// # Errors
///
/// Returns `SheetError::Serialize` if the xlsx writer rejects the content.
pub fn serialize_workbook(book: &CleanedBook) -> Result<Vec<u8>> {
    let empty = Table::empty();
    let mut labeled: IndexMap<String, (String, &Table)> = IndexMap::new();
    for (name, table) in book.sheets() {
        let label = sheet_label(name);
        if labeled
            .insert(label.to_lowercase(), (label.clone(), table))
            .is_some()
        {
            tracing::warn!(
                sheet = %name,
                label = %label,
                "sheet name collides with an earlier sheet, keeping the later one"
            );
        }
    }
    if labeled.is_empty() {
        labeled.insert("sheet1".to_string(), ("Sheet1".to_string(), &empty));
    }

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let mut workbook = Workbook::new();
    for (label, table) in labeled.into_values() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&label).map_err(SheetError::serialize)?;
        write_table(worksheet, table, &header_format, &date_format)?;
    }

    workbook.save_to_buffer().map_err(SheetError::serialize)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
    date_format: &Format,
) -> Result<()> {
    let mut widths: Vec<usize> = table
        .column_names()
        .iter()
        .map(|name| name.chars().count())
        .collect();

    for (col_idx, name) in table.column_names().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_num(col_idx)?, name, header_format)
            .map_err(SheetError::serialize)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(SheetError::serialize)?;

    let mut row_num: u32 = 1;
    for row in table.rows() {
        if row.iter().all(CellValue::is_missing) {
            continue;
        }
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_num(col_idx)?;
            widths[col_idx] = widths[col_idx].max(cell.render().chars().count());
            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row_num, col, *b)
                        .map_err(SheetError::serialize)?;
                }
                CellValue::Int(i) => {
                    // Excel stores all numbers as f64
                    worksheet
                        .write_number(row_num, col, *i as f64)
                        .map_err(SheetError::serialize)?;
                }
                CellValue::Float(f) => {
                    worksheet
                        .write_number(row_num, col, *f)
                        .map_err(SheetError::serialize)?;
                }
                CellValue::Date(d) => write_date(worksheet, row_num, col, *d, date_format)?,
                CellValue::String(s) => {
                    worksheet
                        .write_string(row_num, col, s)
                        .map_err(SheetError::serialize)?;
                }
            }
        }
        row_num = row_num
            .checked_add(1)
            .ok_or_else(|| SheetError::Serialize("Row index overflow".to_string()))?;
    }

    for (col_idx, width) in widths.into_iter().enumerate() {
        let width = (width + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width(col_num(col_idx)?, width as f64)
            .map_err(SheetError::serialize)?;
    }

    Ok(())
}

fn write_date(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    date: chrono::NaiveDate,
    format: &Format,
) -> Result<()> {
    use chrono::Datelike;

    let excel_date = u16::try_from(date.year())
        .ok()
        .and_then(|year| ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok());
    match excel_date {
        Some(dt) => worksheet.write_datetime_with_format(row, col, &dt, format),
        // Outside the range Excel can store as a date serial
        None => worksheet.write_string(row, col, date.format("%Y-%m-%d").to_string()),
    }
    .map_err(SheetError::serialize)?;
    Ok(())
}

fn col_num(col_idx: usize) -> Result<u16> {
    u16::try_from(col_idx).map_err(|_| SheetError::Serialize("Column index overflow".to_string()))
}

impl CleanedBook {
    /// Serialize the book to an xlsx file
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be serialized or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = serialize_workbook(self)?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}
