//! Core error types for koala-core.
//!
//! This module defines the error hierarchy using thiserror. Every
//! fallible operation in the library reports through one of these
//! enums; nothing here is fatal to the process -- callers surface the
//! message and keep prior state intact.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for koala-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors -- reported to the user, nothing mutated
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Parse errors for imported data -- reported, operation aborted
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Remote-service errors -- caught, logged, surfaced with a retry hint
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be decoded into its entity type
    #[error("Corrupt value under key '{key}': {message}")]
    CorruptValue { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or malformed configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Site pattern fails the entry check (needs a dot or an http prefix)
    #[error("'{0}' is not a valid website (e.g. facebook.com or https://facebook.com)")]
    InvalidSitePattern(String),

    /// Site already present under normalized-host comparison
    #[error("'{0}' is already on the block list")]
    AlreadyBlocked(String),

    /// Flashcard front or back empty after trimming
    #[error("Both front and back of the flashcard are required")]
    EmptyFlashcardField,

    /// Answer text empty after trimming
    #[error("Enter an answer before grading")]
    EmptyAnswer,

    /// No API key stored or provided via the environment
    #[error("No API key for {service}; store one or set {env_var}")]
    MissingApiKey {
        service: &'static str,
        env_var: &'static str,
    },
}

/// Parse errors for user-supplied import data.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Site-list JSON import was not an array of records
    #[error("Site import failed: {0}")]
    SiteImport(String),

    /// Flashcard import file must carry a .csv extension
    #[error("'{0}' is not a CSV file")]
    NotCsv(String),

    /// CSV text produced zero accepted rows
    #[error("No valid flashcards found in the CSV input")]
    NoValidRows,

    /// Generation response carried no parseable card array
    #[error("No flashcard array found in the service response")]
    NoCardsInResponse,
}

/// Remote-service errors. No retry policy exists; the caller reports
/// the failure and leaves already-written local state in place.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request could not be sent or the response not read
    #[error("{service} request failed: {message}")]
    RequestFailed { service: &'static str, message: String },

    /// Non-success HTTP status
    #[error("{service} error (HTTP {status}): {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("{service} returned an unexpected response: {message}")]
    UnexpectedResponse { service: &'static str, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
