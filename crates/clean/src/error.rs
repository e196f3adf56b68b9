//! Error types for the cleaning pipeline.

use sheethub_sheet::SheetError;
use thiserror::Error;

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Broad classification of a [`CleanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Serialization,
    Config,
    Other,
}

/// Errors that can occur while cleaning a workbook.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input bytes are not a readable spreadsheet.
    #[error("{0}")]
    Decode(String),

    /// The cleaned book could not be written.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid cleaning options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Table construction failed inside a stage.
    #[error("Sheet error: {0}")]
    Sheet(SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CleanError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CleanError::Decode(_) => ErrorKind::Decode,
            CleanError::Serialization(_) => ErrorKind::Serialization,
            CleanError::Config(_) => ErrorKind::Config,
            CleanError::Sheet(_) | CleanError::Io(_) => ErrorKind::Other,
        }
    }
}

impl From<SheetError> for CleanError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Decode { .. } => CleanError::Decode(err.to_string()),
            SheetError::Serialize(message) => CleanError::Serialization(message),
            SheetError::Io(io) => CleanError::Io(io),
            other => CleanError::Sheet(other),
        }
    }
}
