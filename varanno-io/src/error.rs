use std::io;
use thiserror::Error;

/// Error type for varanno-io operations.
///
/// Every variant names the file it came from.
#[derive(Error, Debug)]
pub enum DelimitedFileError {
    /// The file could not be opened.
    #[error("Can't open {file}: {message}")]
    Open { file: String, message: String },

    /// IO error occurred while reading the file.
    #[error("IO error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    /// No `>`-prefixed header line was found before the data.
    #[error("Missing `>` header line in {file} (line {line})")]
    MissingHeader { file: String, line: usize },

    /// The same column name appears twice in the header.
    #[error("Duplicate column `{column}` in {file}")]
    DuplicateColumn { file: String, column: String },

    /// A data row has a different number of fields than the header.
    #[error("Expected {expected} fields but found {found} in {file} (line {line})")]
    FieldCount {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A required column is not present in the file.
    #[error("Missing column `{column}` in {file}")]
    MissingColumn { file: String, column: String },

    /// A field value could not be parsed into the requested type.
    #[error("Invalid value {value:?} for column `{column}` in {file} (line {line})")]
    InvalidValue {
        file: String,
        line: usize,
        column: String,
        value: String,
    },
}

/// Result type alias for varanno-io operations.
pub type Result<T> = std::result::Result<T, DelimitedFileError>;
