//! Error types for tabular conversion.

use std::path::PathBuf;

use thiserror::Error;

use crate::convert::FormatKind;

/// Boxed error from an underlying parser or serializer.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading, validating, or saving records.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source file has zero bytes.
    #[error("File is empty: {}", path.display())]
    EmptyInput {
        /// Path of the empty file.
        path: PathBuf,
    },

    /// Neither the explicit format nor the file extension names a known format.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A save was requested with zero records.
    #[error("No data to save")]
    EmptyDataset,

    /// A CSV save met a mapping or sequence value.
    #[error(
        "Nested data structures are not supported for CSV format (record {record}, field '{field}')"
    )]
    NestedDataUnsupported {
        /// Zero-based index of the offending record.
        record: usize,
        /// Name of the offending field.
        field: String,
    },

    /// A CSV save met a field that is not part of the header row.
    #[error("Record {record} has field '{field}' which is not in the CSV header")]
    UnknownField {
        /// Zero-based index of the offending record.
        record: usize,
        /// Name of the offending field.
        field: String,
    },

    /// Malformed input for the given format.
    #[error("{format} parse error: {source}")]
    ParseError {
        /// Format being parsed.
        format: FormatKind,
        /// Underlying parser error.
        source: BoxedSource,
    },

    /// The serializer for the given format failed.
    #[error("{format} serialization error: {source}")]
    SerializeError {
        /// Format being written.
        format: FormatKind,
        /// Underlying serializer error.
        source: BoxedSource,
    },

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading or writing a file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConvertError {
    /// Build a parse error for `format` from any error type.
    pub fn parse(format: FormatKind, source: impl Into<BoxedSource>) -> Self {
        ConvertError::ParseError {
            format,
            source: source.into(),
        }
    }

    /// Build a serialization error for `format` from any error type.
    pub fn serialize(format: FormatKind, source: impl Into<BoxedSource>) -> Self {
        ConvertError::SerializeError {
            format,
            source: source.into(),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
