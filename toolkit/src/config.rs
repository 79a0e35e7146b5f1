//! Toolkit configuration.
//!
//! Constants shared by the command line and the browser frontend, plus
//! [`ToolkitConfig`] for the values that may be overridden from the
//! environment (`HPT_MAX_FINDINGS`, `HPT_SCHEMA_VERSION`, `HPT_STATE_DIR`).

use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// Maximum number of errors (and alerts) collected per run.
///
/// The validator stops collecting once it reaches this cap.
pub const MAX_FINDINGS: usize = 250;

/// Schema version used when nothing else was selected.
pub const DEFAULT_SCHEMA_VERSION: &str = "v2.0";

/// Schema versions the toolkit knows how to request.
pub const SCHEMA_VERSIONS: &[&str] = &["v2.0"];

/// Storage key holding the last validation snapshot.
pub const VALIDATION_STORAGE_KEY: &str = "cms-hpt-validation-results";

/// Storage key holding the filename wizard fields.
pub const WIZARD_STORAGE_KEY: &str = "cms-hpt-file-name-wizard";

/// Accepted types for the MRF upload control.
pub const ACCEPTED_FILE_TYPES: &str = ".csv,.json,text/csv,application/json";

/// File name of the generated discoverability file.
pub const TXT_FILE_NAME: &str = "cms-hpt.txt";

/// File name of the downloadable results export.
pub const RESULTS_FILE_NAME: &str = "validation-results.csv";

/// Directory used by the CLI for persisted state (relative to current dir).
pub const DEFAULT_STATE_DIR: &str = ".hpt";

/// Tool version reported in results exports.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolkitConfig {
    /// Cap on collected errors and alerts
    pub max_findings: usize,
    /// Schema version passed to the validator
    pub schema_version: String,
    /// Where the CLI keeps its persisted state
    pub state_dir: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            max_findings: MAX_FINDINGS,
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            state_dir: DEFAULT_STATE_DIR.to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Build a configuration from `HPT_*` environment variables.
    pub fn from_env() -> ToolkitResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ToolkitResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("HPT_MAX_FINDINGS") {
            config.max_findings = raw.trim().parse().map_err(|_| {
                ToolkitError::Config(format!("HPT_MAX_FINDINGS must be a number, got '{}'", raw))
            })?;
        }
        if let Some(version) = lookup("HPT_SCHEMA_VERSION") {
            config.schema_version = version;
        }
        if let Some(dir) = lookup("HPT_STATE_DIR") {
            config.state_dir = dir;
        }

        config.check()?;
        Ok(config)
    }

    /// Reject values the orchestrator cannot work with.
    pub fn check(&self) -> ToolkitResult<()> {
        if self.max_findings == 0 {
            return Err(ToolkitError::Config("max findings must be at least 1".into()));
        }
        if self.schema_version.trim().is_empty() {
            return Err(ToolkitError::Config("schema version must not be empty".into()));
        }
        Ok(())
    }
}
