//! Error types for untable library.

use std::io;
use thiserror::Error;

/// Result type alias for untable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or writing tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic HTML parsing error.
    #[error("HTML parsing error: {0}")]
    Parse(String),

    /// Table open/close tags do not pair up, so table boundaries are unknown.
    #[error("Unbalanced table markup: {opened} opening <table> tags, {closed} closing tags")]
    UnbalancedTables {
        /// Number of `<table` occurrences
        opened: usize,
        /// Number of `</table` occurrences
        closed: usize,
    },

    /// Requested table index does not exist in the document.
    #[error("Table {index} is out of range (document has {count} tables)")]
    TableIndexOutOfRange {
        /// Requested zero-based index
        index: usize,
        /// Number of tables in the document
        count: usize,
    },

    /// A row does not have the table's column count and padding is disabled.
    #[error("Table {table}, row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        /// Zero-based table index
        table: usize,
        /// Zero-based row index
        row: usize,
        /// Column count of the widest row
        expected: usize,
        /// Cell count of the offending row
        found: usize,
    },

    /// The input bytes could not be decoded as text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The sheet name is not accepted by spreadsheet applications.
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Error building or serializing the workbook.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Error during rendering (JSON, text preview).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(e) => Error::Io(e),
            _ => Error::Workbook(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TableIndexOutOfRange { index: 3, count: 2 };
        assert_eq!(
            err.to_string(),
            "Table 3 is out of range (document has 2 tables)"
        );

        let err = Error::UnbalancedTables {
            opened: 2,
            closed: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unbalanced table markup: 2 opening <table> tags, 1 closing tags"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_xlsx_io_error_maps_to_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = rust_xlsxwriter::XlsxError::IoError(io_err).into();
        assert!(matches!(err, Error::Io(_)));
    }
}
