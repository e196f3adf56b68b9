use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value as read from a spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null, or text that is empty after trimming.
    ///
    /// Every cleaning stage uses this as its notion of a missing field.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            CellValue::Null | CellValue::Bool(_) | CellValue::Date(_) => None,
        }
    }

    /// Whether the value is a number or text that parses as one.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_float().is_some()
    }

    /// Try to get the value as a date
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::String(s) => parse_date(s.trim()),
            _ => None,
        }
    }

    /// Textual rendering used by the header and cleaning heuristics.
    ///
    /// Null renders as the empty string and dates as `YYYY-MM-DD`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Identity key for equality comparisons across rows.
    ///
    /// Integral floats share a key with the equal integer so a value read as
    /// `50000` and one read as `50000.0` are the same record field.
    #[must_use]
    pub fn identity_key(&self) -> String {
        match self {
            CellValue::Null => "N".to_string(),
            CellValue::Bool(b) => format!("B{b}"),
            CellValue::Int(i) => format!("D{i}"),
            CellValue::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                format!("D{}", *f as i64)
            }
            CellValue::Float(f) => format!("F{f:?}"),
            CellValue::Date(d) => format!("T{d}"),
            CellValue::String(s) => format!("S{s}"),
        }
    }
}

/// Parse `YYYY-MM-DD`, optionally followed by a time part.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    let rest = &s[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}
