//! Error types for NutriLens core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages.

use thiserror::Error;

/// Result type alias for NutriLens operations.
pub type Result<T> = std::result::Result<T, NutriError>;

/// Core error type for NutriLens operations.
#[derive(Debug, Error)]
pub enum NutriError {
    /// A goal used as a divisor or target was zero, negative or not finite
    #[error("Invalid goal: {goal} (goals must be greater than zero)")]
    InvalidGoal { goal: f64 },

    /// Biometric inputs that cannot produce a meaningful BMR
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store file not found
    #[error("Store not found")]
    StoreNotFound,

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
