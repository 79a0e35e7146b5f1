//! # HPT Toolkit - Hospital Price Transparency file tools
//!
//! Validate machine-readable files (MRFs), name them, and generate the
//! `cms-hpt.txt` discoverability file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  File Input │────▶│ Orchestrator │────▶│  Validator  │────▶│  Snapshot   │
//! │  (accept)   │     │  (tokens)    │     │ (CSV/JSON)  │     │ (persisted) │
//! └─────────────┘     └──────────────┘     └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Record List │────▶│  Serializer  │────▶│ cms-hpt.txt │
//! │  (editor)   │     │  + rules     │     │  (artifact) │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hpt_toolkit::{FileStore, LocalValidator, UploadedFile, ValidationOptions, ValidationSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = ValidationSession::new(LocalValidator, FileStore::new(), ValidationOptions::default());
//!     let bytes = std::fs::read("prices.csv").unwrap();
//!     session.submit(&UploadedFile::new("prices.csv", bytes)).await;
//!     println!("{} errors", session.snapshot().errors.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Constants and environment configuration
//! - [`models`] - Formats, findings and alerts
//! - [`validation`] - The validator collaborator (and a native implementation)
//! - [`orchestrator`] - Validation workflow, snapshots and results export
//! - [`storage`] - Durable key/value storage
//! - [`file_input`] - Accepted-type enforcement for file pickers
//! - [`txt`] - `cms-hpt.txt` records, format and field rules
//! - [`filename`] - MRF naming wizard
//! - [`artifact`] - Downloadable files and object URLs

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Validation
pub mod orchestrator;
pub mod validation;

// Storage
pub mod storage;

// Tools
pub mod file_input;
pub mod filename;
pub mod txt;

// Downloads
pub mod artifact;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ArtifactError, RecordError, StorageError, ToolkitError, ToolkitResult, ValidatorError,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::ToolkitConfig;

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Alert, AlertKind, FileFormat, RawFinding, Severity, UploadedFile, ValidationFinding,
    ValidatorOutput,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_mrf_filename, MrfValidator, ValidationOptions};

#[cfg(feature = "native")]
pub use validation::LocalValidator;

pub use orchestrator::{
    render_results, results_artifact, FindingSummary, RunStatus, ValidationSession,
    ValidationSnapshot,
};

// =============================================================================
// Re-exports - Storage
// =============================================================================

pub use storage::{KeyValueStore, MemoryStore, PersistedState};

#[cfg(feature = "native")]
pub use storage::FileStore;

// =============================================================================
// Re-exports - Tools
// =============================================================================

pub use file_input::{AcceptedTypes, CandidateFile, ChangeOutcome, FileInputState};
pub use filename::{check_validity, compose, FilenameFields, FilenameWizard};
pub use txt::{check_records, HospitalRecord, HospitalRecordPatch, RecordList};

pub use artifact::{Artifact, DownloadSlot, ObjectUrlFactory};
