use thiserror::Error;

use varanno_core::models::Range;
use varanno_io::DelimitedFileError;

/// Errors raised while loading an annotation store.
///
/// A load either succeeds completely or fails with one of these; there is no partially
/// loaded store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The source is missing something the store needs, or holds a value it cannot use.
    #[error("{message} in {file}")]
    Format { file: String, message: String },

    /// A window rebuilt from a midpoint does not fit inside its contig.
    #[error(
        "window [{begin}, {end}) on chromosome {chromosome} falls outside contig {contig} in {file}"
    )]
    Geometry {
        file: String,
        chromosome: String,
        begin: i64,
        end: i64,
        contig: Range,
    },

    /// A record's range does not lie within its chromosome.
    #[error("range {range} is outside chromosome {chromosome} (length {length}) in {file} (line {line})")]
    RangeOutOfBounds {
        file: String,
        line: usize,
        chromosome: String,
        range: Range,
        length: u32,
    },

    #[error(transparent)]
    Delimited(#[from] DelimitedFileError),
}

impl StoreError {
    pub fn format(file: &str, message: impl Into<String>) -> Self {
        StoreError::Format {
            file: file.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
