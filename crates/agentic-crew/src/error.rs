//! Error types for agentic-crew.
//!
//! All errors are strongly typed and propagated without panicking.
//! Identity construction errors surface immediately; ingestion and
//! provider failures are degraded by their callers instead.

use std::path::PathBuf;

/// Crate-wide error type covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("Fingerprint seed cannot be empty")]
    InvalidSeed,

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid URL: {url}. Error: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Document conversion failed: {0}")]
    Conversion(String),

    #[error("{field} must be {expected} (entry '{entry}')")]
    InvalidField {
        entry: String,
        field: String,
        expected: &'static str,
    },

    #[error("Missing required field '{field}' (entry '{entry}')")]
    MissingField { entry: String, field: String },

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CrewError>;
