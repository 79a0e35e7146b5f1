//! Error types for the HPT toolkit.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ValidatorError`] - The validator could not read or process a file
//! - [`StorageError`] - Durable client storage failures
//! - [`RecordError`] - Invalid edits of the hospital record list
//! - [`ArtifactError`] - Downloadable artifact creation failures
//! - [`ToolkitError`] - Top-level error used by the CLI and frontend glue
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Content violations found inside a file are *not* errors: they are
//! [`crate::models::ValidationFinding`]s and never travel through this module.

use thiserror::Error;

// =============================================================================
// Validator Errors
// =============================================================================

/// Errors raised when the validator rejects a file outright.
///
/// Any of these moves a validation snapshot into its read-error state.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The file could not be read or parsed at all.
    #[error("File is not machine readable: {0}")]
    Unreadable(String),

    /// No schema is known for the requested version.
    #[error("Unknown schema version: {0}")]
    UnknownSchemaVersion(String),

    /// The collaborator failed for a reason of its own.
    #[error("Validator failed: {0}")]
    Collaborator(String),

    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from a durable key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is not reachable (no window, storage disabled, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (quota, permissions, ...).
    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// IO error.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors when editing the hospital record list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Index past the end of the list.
    #[error("No hospital record at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The list must keep at least one record.
    #[error("Cannot remove the last hospital record")]
    LastRecord,
}

// =============================================================================
// Artifact Errors
// =============================================================================

/// Errors when producing a downloadable artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The platform could not create an object URL.
    #[error("Failed to create download URL: {0}")]
    CreateUrl(String),

    /// IO error while writing the artifact to disk.
    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Toolkit Errors (top-level)
// =============================================================================

/// Top-level error type for the command line and frontend glue.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Validator error.
    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record list error.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Artifact error.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validator operations.
pub type ValidatorResult<T> = Result<T, ValidatorError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for record list edits.
pub type RecordResult<T> = Result<T, RecordError>;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Result type for top-level operations.
pub type ToolkitResult<T> = Result<T, ToolkitError>;
