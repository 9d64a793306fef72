//! Error types for hrdash.
//!
//! Most failures in the dashboard core are recoverable and never reach this
//! type: fetch failures become [`crate::provider::Fetched::Unavailable`] and
//! malformed bookmark data becomes an empty set. What remains here are the
//! setup and storage errors a caller has to decide about.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hrdash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Database schema version is unreadable or unsupported.
    #[error("database schema error: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A value could not be written to local storage.
    #[error("failed to write '{key}' to storage: {message}")]
    StorageWrite {
        /// Storage key that was being written.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Provider Errors ===
    /// An HTTP request to the record provider failed.
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The record provider answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The record provider answered with an unexpected payload.
    #[error("invalid response from {source_name}: {message}")]
    InvalidResponse {
        /// Where the payload came from (URL or file path).
        source_name: String,
        /// Description of what was wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for hrdash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage write error.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" answer from the record provider.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }
}
