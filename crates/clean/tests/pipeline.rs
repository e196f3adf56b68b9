use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sheethub_clean::{
    clean_book, clean_workbook, clean_workbook_detailed, detect_header_row, serialize_workbook,
    CleanOptions, ErrorKind,
};
use sheethub_sheet::{CellValue, RawBook};

/// A payroll export with a title, a blank spacer row, a leftover index
/// column, one duplicate employee and a totals footer.
fn messy_payroll() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let ws = workbook.add_worksheet();
    ws.set_name("Payroll").unwrap();
    ws.write_string(0, 0, "Payroll export - March").unwrap();

    let header = ["", "Employee ID", "Name", "Dept", "Hire Date", "Salary"];
    for (col, label) in header.iter().enumerate() {
        if !label.is_empty() {
            ws.write_string(2, col as u16, *label).unwrap();
        }
    }

    let rows: [(&str, Option<&str>, &str, (u16, u8, u8), f64); 4] = [
        ("EMP-001", None, "Ops", (2020, 1, 15), 50000.0),
        ("EMP-002", Some("Bob"), "Sales", (2021, 7, 1), 60000.0),
        ("EMP-003", Some("Cara"), "Ops", (2019, 3, 4), 55000.0),
        ("EMP-001", Some("Alice"), "Ops", (2020, 1, 15), 50000.0),
    ];
    for (i, (id, name, dept, (y, m, d), salary)) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        ws.write_number(row, 0, (i + 1) as f64).unwrap();
        ws.write_string(row, 1, *id).unwrap();
        if let Some(name) = name {
            ws.write_string(row, 2, *name).unwrap();
        }
        ws.write_string(row, 3, *dept).unwrap();
        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
        ws.write_datetime_with_format(row, 4, &date, &date_format).unwrap();
        ws.write_number(row, 5, *salary).unwrap();
    }
    ws.write_string(7, 1, "Grand Total").unwrap();
    ws.write_number(7, 5, 215_000.0).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_messy_payroll_is_cleaned() {
    let book = clean_workbook(&messy_payroll(), &CleanOptions::default()).unwrap();

    assert_eq!(book.sheet_names(), vec!["Payroll", "Notes"]);
    let table = book.get("Payroll").unwrap();
    assert_eq!(
        table.column_names(),
        ["employee_id", "name", "dept", "hire_date", "salary"]
    );
    // "employeeid" does not exist after standardization, so only exact
    // duplicates would collapse; none do here.
    assert_eq!(table.row_count(), 4);
    assert!(book.get("Notes").unwrap().is_empty());
}

#[test]
fn test_dedupe_on_standardized_key_keeps_complete_record() {
    let options = CleanOptions::default().with_default_dedup_keys(["employee_id"]);
    let outcome = clean_workbook_detailed(&messy_payroll(), &options).unwrap();

    let report = &outcome.reports[0];
    assert_eq!(report.header_row, Some(2));
    assert_eq!(report.summary_rows_removed, 1);
    assert_eq!(report.junk_columns_removed, vec!["column_0"]);
    assert_eq!(report.duplicates_removed, 1);

    let table = outcome.book.get("Payroll").unwrap();
    let ids: Vec<String> = table.rows().iter().map(|r| r[0].render()).collect();
    assert_eq!(ids, vec!["EMP-002", "EMP-003", "EMP-001"]);
    assert_eq!(table.rows()[2][1], CellValue::from("Alice"));
    assert_eq!(
        table.rows()[2][3],
        CellValue::Date(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap())
    );
}

#[test]
fn test_per_sheet_keys_override_default() {
    let options = CleanOptions::default()
        .with_default_dedup_keys(["employee_id"])
        .with_sheet_dedup_keys("Payroll", ["dept"]);
    let book = clean_workbook(&messy_payroll(), &options).unwrap();
    let table = book.get("Payroll").unwrap();
    let depts: Vec<String> = table.rows().iter().map(|r| r[2].render()).collect();
    assert_eq!(depts, vec!["Sales", "Ops"]);
}

#[test]
fn test_order_preserved_without_dedupe() {
    let options = CleanOptions::default().with_dedupe(false);
    let book = clean_workbook(&messy_payroll(), &options).unwrap();
    let table = book.get("Payroll").unwrap();
    let ids: Vec<String> = table.rows().iter().map(|r| r[0].render()).collect();
    assert_eq!(ids, vec!["EMP-001", "EMP-002", "EMP-003", "EMP-001"]);
}

#[test]
fn test_summary_filter_leaves_no_keyword_rows() {
    let keywords = ["ops", "total"];
    let options = CleanOptions::minimal()
        .with_summary_filter(true)
        .with_summary_keywords(keywords);
    let raw = RawBook::from_bytes(&messy_payroll()).unwrap();
    let outcome = clean_book(&raw, &options).unwrap();
    let table = outcome.book.get("Payroll").unwrap();

    assert!(table.row_count() <= outcome.reports[0].body_rows);
    for row in table.rows() {
        for cell in row {
            let text = cell.render().to_lowercase();
            assert!(keywords.iter().all(|k| !text.contains(k)));
        }
    }
}

#[test]
fn test_garbage_bytes_are_a_decode_error() {
    let err = clean_workbook(b"PK\x03\x04 truncated", &CleanOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("Re-save"));
}

#[test]
fn test_serialize_then_clean_is_a_fixed_point() {
    let options = CleanOptions::default().with_default_dedup_keys(["employee_id"]);
    let first = clean_workbook(&messy_payroll(), &options).unwrap();

    let bytes = serialize_workbook(&first).unwrap();
    let raw = RawBook::from_bytes(&bytes).unwrap();
    assert_eq!(detect_header_row(raw.get("Payroll").unwrap()), 0);

    let second = clean_workbook(&bytes, &options).unwrap();
    let before = first.get("Payroll").unwrap();
    let after = second.get("Payroll").unwrap();
    assert_eq!(before.column_names(), after.column_names());
    assert_eq!(before.row_count(), after.row_count());
    for (a, b) in before.rows().iter().zip(after.rows()) {
        let a: Vec<String> = a.iter().map(CellValue::render).collect();
        let b: Vec<String> = b.iter().map(CellValue::render).collect();
        assert_eq!(a, b);
    }
}
