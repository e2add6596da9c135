//! Error types for the routine engine.
//!
//! Dataset loading and kit lookup can fail. Resolution, upgrade diffing and
//! cart reconciliation are fail-open and never return errors.

use thiserror::Error;

/// Errors from the routine engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Dataset JSON did not match the expected schema.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Dataset parsed but broke a structural invariant.
    #[error("dataset validation failed with {} problem(s): {}", .0.len(), .0.join("; "))]
    Validation(Vec<String>),

    /// No kit with this slug in the dataset.
    #[error("unknown kit: {0}")]
    UnknownKit(String),
}

/// Result type alias for [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
