//! Error types for lsofalib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, parsing or aggregating a listing
#[derive(Error, Debug)]
pub enum LsofaError {
    /// Failed to open the input file
    #[error("failed to open '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input has no header line
    #[error("input is empty: expected an lsof header line")]
    EmptyInput,

    /// A column marker was not found in the header line
    #[error("header line has no '{token}' column")]
    MissingHeaderToken { token: String },

    /// Column offsets derived from the header are out of order
    #[error("malformed header: column {column} would span [{start}, {end})")]
    MalformedHeader {
        column: String,
        start: usize,
        end: usize,
    },

    /// Grouping field is not one of the known columns
    #[error("unknown field '{0}' (available fields: {fields})", fields = crate::data::columns::available_fields())]
    UnknownField(String),

    /// Grouping field listed more than once
    #[error("field '{0}' appears more than once in groupings")]
    DuplicateField(String),

    /// Grouping list has no field names
    #[error("groupings must name at least one field")]
    EmptyGrouping,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
