//! Backing store errors

use thiserror::Error;
use typedprops_units::UnitError;

/// Error type for backing store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no property '{0}'")]
    MissingKey(String),

    #[error("property '{0}' already exists")]
    ExistingKey(String),

    #[error("invalid property key '{0}'")]
    InvalidKey(String),

    #[error("property '{key}' is not {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("invalid unit symbol '{symbol}' for property '{key}'")]
    InvalidUnitSymbol { key: String, symbol: String },

    #[error("cannot expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },

    #[error("property '{0}' holds a non-finite real, which JSON cannot represent")]
    NonFiniteReal(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
