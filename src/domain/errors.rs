//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use crate::domain::kind::ResourceKind;
use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// De-identification errors
    #[error("De-identification error: {0}")]
    Deid(#[from] DeidError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Audit logging errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// De-identification-specific errors
///
/// Only errors that fail a whole record live here. Locally recoverable
/// conditions (malformed dates, unresolvable patient references) are
/// reported as [`crate::deid::report::TransformWarning`]s instead, so a
/// single bad field never aborts a record and a single bad record never
/// aborts a batch.
#[derive(Debug, Error)]
pub enum DeidError {
    /// No field policy exists for the resource type
    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),

    /// Resource carries no `id` property
    #[error("Resource of kind {0} has no id")]
    MissingResourceId(ResourceKind),

    /// Resource is not a JSON object
    #[error("Resource is not a JSON object")]
    NotAnObject,
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
