//! The persisted state of one validation run and its transitions.
//!
//! A snapshot is never patched in place: each event produces a complete new
//! value through one of the transition functions below.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFAULT_SCHEMA_VERSION;
use crate::models::{FileFormat, ValidationFinding, ValidatorOutput};

/// Human readable instant, e.g. `Mon Oct 19 2026 14:03:11 GMT-0400`.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%a %b %d %Y %H:%M:%S GMT%z")
        .to_string()
}

/// Where a snapshot stands in the run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing validated yet
    Idle,
    /// Waiting for the validator
    Loading,
    /// The validator could not read the file
    ReadError,
    /// The file extension is neither csv nor json
    UnsupportedFormat,
    /// Findings are available
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationSnapshot {
    pub filename: String,
    pub schema_version: String,
    pub valid: bool,
    /// Non-warning findings, in validator order
    pub errors: Vec<ValidationFinding>,
    /// Warning-flagged findings, in validator order
    pub warnings: Vec<ValidationFinding>,
    pub alerts: Vec<ValidationFinding>,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub loading: bool,
    pub read_error: bool,
    pub did_mount: bool,
    pub unsupported_format: bool,
}

impl Default for ValidationSnapshot {
    fn default() -> Self {
        Self {
            filename: String::new(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            alerts: Vec::new(),
            start_timestamp: String::new(),
            end_timestamp: String::new(),
            loading: false,
            read_error: false,
            did_mount: false,
            unsupported_format: false,
        }
    }
}

impl ValidationSnapshot {
    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// A file was picked: show it as loading. The previous run's results stay
    /// visible until the new ones arrive.
    pub fn file_selected(&self, filename: &str, schema_version: &str) -> Self {
        Self {
            filename: filename.to_string(),
            schema_version: schema_version.to_string(),
            loading: true,
            read_error: false,
            unsupported_format: false,
            ..self.clone()
        }
    }

    /// The validator resolved.
    pub fn validation_succeeded(
        filename: &str,
        schema_version: &str,
        output: ValidatorOutput,
        start_timestamp: String,
        end_timestamp: String,
    ) -> Self {
        let (warnings, errors): (Vec<_>, Vec<_>) = output
            .errors
            .into_iter()
            .map(ValidationFinding::from_error)
            .partition(ValidationFinding::is_warning);

        Self {
            filename: filename.to_string(),
            schema_version: schema_version.to_string(),
            valid: output.valid,
            errors,
            warnings,
            alerts: output
                .alerts
                .unwrap_or_default()
                .into_iter()
                .map(ValidationFinding::from_alert)
                .collect(),
            start_timestamp,
            end_timestamp,
            loading: false,
            read_error: false,
            did_mount: true,
            unsupported_format: false,
        }
    }

    /// The validator rejected the file. Nothing from earlier runs survives.
    pub fn validation_failed(filename: &str, schema_version: &str) -> Self {
        Self {
            filename: filename.to_string(),
            schema_version: schema_version.to_string(),
            valid: false,
            read_error: true,
            did_mount: true,
            ..Self::default()
        }
    }

    /// The file extension is not one the validator understands.
    pub fn unsupported_format(filename: &str, schema_version: &str) -> Self {
        Self {
            filename: filename.to_string(),
            schema_version: schema_version.to_string(),
            valid: false,
            did_mount: true,
            unsupported_format: true,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    pub fn status(&self) -> RunStatus {
        if self.loading {
            RunStatus::Loading
        } else if self.unsupported_format {
            RunStatus::UnsupportedFormat
        } else if self.read_error {
            RunStatus::ReadError
        } else if self.did_mount {
            RunStatus::Complete
        } else {
            RunStatus::Idle
        }
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_filename(&self.filename)
    }

    /// "CSV cell" for CSV files, "JSON location" otherwise.
    pub fn location_header(&self) -> &'static str {
        FileFormat::location_header(self.format())
    }

    pub fn error_summary(&self, max_findings: usize) -> FindingSummary {
        FindingSummary::capped(self.errors.len(), max_findings, "error")
    }

    pub fn alert_summary(&self, max_findings: usize) -> FindingSummary {
        FindingSummary::capped(self.alerts.len(), max_findings, "alert")
    }

    /// Warnings are never capped.
    pub fn warning_summary(&self) -> FindingSummary {
        FindingSummary::exact(self.warnings.len(), "warning")
    }
}

/// Count of one class of findings, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindingSummary {
    pub count: usize,
    /// The validator stopped collecting at the cap, so `count` is a floor
    pub truncated: bool,
    noun: &'static str,
}

impl FindingSummary {
    pub fn exact(count: usize, noun: &'static str) -> Self {
        Self {
            count,
            truncated: false,
            noun,
        }
    }

    pub fn capped(count: usize, max_findings: usize, noun: &'static str) -> Self {
        Self {
            count,
            truncated: count >= max_findings,
            noun,
        }
    }
}

impl fmt::Display for FindingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            f.write_str("at least ")?;
        }
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.count, self.noun, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawFinding, Severity};

    fn output(errors: Vec<RawFinding>) -> ValidatorOutput {
        ValidatorOutput {
            valid: errors.iter().all(|e| e.warning),
            errors,
            alerts: None,
        }
    }

    #[test]
    fn test_default_snapshot() {
        let snapshot = ValidationSnapshot::default();
        assert!(snapshot.valid);
        assert!(!snapshot.loading);
        assert!(snapshot.errors.is_empty());
        assert_eq!(snapshot.schema_version, "v2.0");
        assert_eq!(snapshot.status(), RunStatus::Idle);
    }

    #[test]
    fn test_partition_preserves_order() {
        let snapshot = ValidationSnapshot::validation_succeeded(
            "a.csv",
            "v2.0",
            output(vec![
                RawFinding::error("A1", "e1"),
                RawFinding::warning("B1", "w1"),
                RawFinding::error("C1", "e2"),
                RawFinding::warning("D1", "w2"),
            ]),
            "start".into(),
            "end".into(),
        );

        let errors: Vec<&str> = snapshot.errors.iter().map(|f| f.message.as_str()).collect();
        let warnings: Vec<&str> = snapshot.warnings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(errors, vec!["e1", "e2"]);
        assert_eq!(warnings, vec!["w1", "w2"]);
        assert!(snapshot.warnings.iter().all(|f| f.severity == Severity::Warning));
        assert!(snapshot.alerts.is_empty());
        assert_eq!(snapshot.status(), RunStatus::Complete);
    }

    #[test]
    fn test_file_selected_keeps_previous_results() {
        let done = ValidationSnapshot::validation_succeeded(
            "a.csv",
            "v2.0",
            output(vec![RawFinding::error("A1", "e1")]),
            "start".into(),
            "end".into(),
        );
        let loading = done.file_selected("b.json", "v2.0");

        assert!(loading.loading);
        assert_eq!(loading.filename, "b.json");
        assert_eq!(loading.errors.len(), 1);
        assert_eq!(loading.status(), RunStatus::Loading);
    }

    #[test]
    fn test_failure_discards_findings() {
        let failed = ValidationSnapshot::validation_failed("a.csv", "v2.0");
        assert!(failed.read_error);
        assert!(failed.did_mount);
        assert!(!failed.loading);
        assert!(failed.errors.is_empty());
        assert_eq!(failed.status(), RunStatus::ReadError);
    }

    #[test]
    fn test_location_header() {
        let mut snapshot = ValidationSnapshot::default();
        snapshot.filename = "mrf.CSV".into();
        assert_eq!(snapshot.location_header(), "CSV cell");
        snapshot.filename = "mrf.json".into();
        assert_eq!(snapshot.location_header(), "JSON location");
    }

    #[test]
    fn test_summary_truncation() {
        assert_eq!(FindingSummary::capped(3, 3, "error").to_string(), "at least 3 errors");
        assert_eq!(FindingSummary::capped(2, 3, "error").to_string(), "2 errors");
        assert_eq!(FindingSummary::capped(1, 3, "error").to_string(), "1 error");
        assert_eq!(FindingSummary::capped(5, 3, "alert").to_string(), "at least 5 alerts");
        assert_eq!(FindingSummary::exact(300, "warning").to_string(), "300 warnings");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_value(ValidationSnapshot::default()).unwrap();
        assert!(json.get("schemaVersion").is_some());
        assert!(json.get("readError").is_some());
        assert!(json.get("didMount").is_some());
        assert!(json.get("startTimestamp").is_some());
    }
}
