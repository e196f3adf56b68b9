//! Header-likeness of a single cell.

use regex::Regex;
use sheethub_sheet::CellValue;

fn numeric_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9,.%]+$").expect("valid regex"))
}

fn id_code_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(id|code|emp)[-_]?\d+").expect("valid regex"))
}

/// Whether a cell looks like a column label rather than a data value.
///
/// Blank cells, typed numbers and dates, numeric or percentage text
/// (`1,200.50`, `15%`) and identifier codes such as `EMP-001` or `id42`
/// are data. Anything else, including mixed labels like `Salary2023`,
/// counts as a label.
#[must_use]
pub fn is_header_like(value: &CellValue) -> bool {
    match value {
        CellValue::Null | CellValue::Int(_) | CellValue::Float(_) | CellValue::Date(_) => false,
        CellValue::Bool(_) | CellValue::String(_) => {
            let text = value.render();
            let text = text.trim();
            if text.is_empty() || numeric_regex().is_match(text) {
                return false;
            }
            !id_code_regex().is_match(&text.to_lowercase())
        }
    }
}
