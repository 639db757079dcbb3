//! Error types for projections and data loading

use thiserror::Error;

/// Errors raised by the fail-fast projection path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Input is finite but outside the range the growth model is defined for
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Input is NaN or infinite
    #[error("non-finite input: {field} = {value}")]
    NonFiniteInput { field: &'static str, value: f64 },
}

/// Errors raised while loading holdings, catalogs or configuration files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dividend frequency label not recognised
    #[error("unknown dividend frequency: {0}")]
    UnknownFrequency(String),

    /// A numeric field that must be finite and non-negative was not
    #[error("invalid {field} for {symbol}: {value}")]
    InvalidField {
        symbol: String,
        field: &'static str,
        value: f64,
    },
}
