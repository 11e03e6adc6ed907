use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading or transforming a dataset.
///
/// All operations fail atomically: an `Err` means the receiver was left
/// untouched.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("malformed input: {detail}")]
    Format { detail: String },

    #[error("unknown column: '{name}'")]
    UnknownColumn { name: String },

    #[error("duplicate column: '{name}'")]
    DuplicateColumn { name: String },

    #[error("row selection out of bounds: {what}")]
    RowOutOfBounds { what: String },
}

impl DatasetError {
    pub(crate) fn format(detail: impl Into<String>) -> Self {
        DatasetError::Format {
            detail: detail.into(),
        }
    }

    pub(crate) fn unknown_column(name: impl Into<String>) -> Self {
        DatasetError::UnknownColumn { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
