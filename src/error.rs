//! Error types for the cut-optimization calculators.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for calculator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Job file not found (-1)
    FileNotFound = -1,
    /// Malformed job file (-3)
    ParseError = -3,
    /// Non-positive or non-finite dimension (E100)
    InvalidDimension = 100,
    /// Sheet height outside the catalog (E101)
    UnsupportedSheetHeight = 101,
    /// Unknown panel catalog entry (E200)
    UnknownPanel = 200,
    /// Nothing to calculate (E201)
    EmptyInput = 201,
    /// Inconsistent configuration (E300)
    InvalidConfig = 300,
}

/// Main error type for the calculators.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Job file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid job file: {message}")]
    ParseError { message: String },

    #[error("Invalid value for '{field}': expected a positive length, got {value}")]
    InvalidDimension { field: String, value: f64 },

    #[error("Unsupported sheet height {height}m (expected 1.80 or 2.40)")]
    UnsupportedSheetHeight { height: f64 },

    #[error("Unknown panel '{name}'")]
    UnknownPanel { name: String },

    #[error("Nothing to calculate: {what}")]
    EmptyInput { what: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalcError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CalcError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CalcError::ParseError { .. } => ErrorCode::ParseError,
            CalcError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            CalcError::UnsupportedSheetHeight { .. } => ErrorCode::UnsupportedSheetHeight,
            CalcError::UnknownPanel { .. } => ErrorCode::UnknownPanel,
            CalcError::EmptyInput { .. } => ErrorCode::EmptyInput,
            CalcError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            CalcError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::ParseError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;
