//! Error types for the heart_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for heart_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model artifact could not be loaded at startup
    #[error("Failed to load model artifact {path:?}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// A model artifact parsed but describes an unusable model
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// A categorical label outside the field's mapping table
    #[error("Unknown {field} label: {value:?}")]
    UnknownLabel { field: &'static str, value: String },

    /// A numeric answer that does not parse
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A numeric input outside the range the form allows
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    /// A batch row failed a check
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: Box<Error>,
    },

    /// A predictor failed to produce a label
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// A predictor produced a label other than 0 or 1
    #[error("{model} returned unexpected label {label}")]
    UnexpectedLabel { model: String, label: u8 },
}

impl Error {
    /// Attribute an unknown label to the field it was entered for.
    ///
    /// Other variants pass through unchanged.
    pub fn for_field(self, field: &'static str) -> Self {
        match self {
            Error::UnknownLabel { value, .. } => Error::UnknownLabel { field, value },
            other => other,
        }
    }
}
