//! Error types for the slotbook library.
//!
//! Only genuinely exceptional conditions are errors here. Booking rule
//! outcomes (outside hours, conflicts, nothing free, lookahead exhausted)
//! are ordinary return values; see [`crate::booking`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a slotbook error.
///
/// # Examples
///
/// ```
/// use slotbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(17)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the slotbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A calendar date could not be parsed or constructed.
    #[error("invalid date {value}: {reason}")]
    InvalidDate {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A time of day could not be parsed or constructed.
    #[error("invalid time {value}: {reason}")]
    InvalidTime {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A repository implementation failed for a reason other than SQLite.
    #[error("repository unavailable: {message}")]
    Repository {
        /// Description of the failure.
        message: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl From<crate::appointment::ValidationError> for Error {
    fn from(err: crate::appointment::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check whether the error came from the storage layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::Error;
    ///
    /// let err = Error::Repository { message: "offline".to_string() };
    /// assert!(err.is_storage_failure());
    ///
    /// let err = Error::InvalidTime { value: "25:00".into(), reason: "hour".into() };
    /// assert!(!err.is_storage_failure());
    /// ```
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Repository { .. }
                | Self::LockTimeout { .. }
                | Self::DatabaseCorruption { .. }
        )
    }
}
