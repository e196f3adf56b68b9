use thiserror::Error;

/// Errors that can occur while building, decoding or exporting sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Could not read spreadsheet: {message}. Re-save the file as .xlsx and try again")]
    Decode { message: String },

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Duplicate column name: {name}")]
    DuplicateColumnName { name: String },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        SheetError::Decode {
            message: err.to_string(),
        }
    }

    pub(crate) fn serialize(err: impl std::fmt::Display) -> Self {
        SheetError::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
