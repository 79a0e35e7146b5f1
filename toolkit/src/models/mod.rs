//! Domain models shared by the orchestrator, the wizard and the TXT generator.
//!
//! - [`FileFormat`] - The two MRF formats the validator understands
//! - [`UploadedFile`] - A selected file handed to the orchestrator
//! - [`RawFinding`] / [`ValidatorOutput`] - What the validator returns
//! - [`ValidationFinding`] - A classified finding stored in a snapshot
//! - [`Alert`] - The single message shown by the wizard and generator

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// File Format
// =============================================================================

/// Machine-readable file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// CSV template (tall or wide)
    Csv,
    /// JSON template
    Json,
}

impl FileFormat {
    /// Recognize a (lowercased) extension. Only `csv` and `json` are known.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Infer the format of a file from its name.
    pub fn from_filename(name: &str) -> Option<Self> {
        Self::from_extension(&file_extension(name))
    }

    /// Extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Header used for the location column of a findings table.
    pub fn location_header(format: Option<Self>) -> &'static str {
        match format {
            Some(Self::Csv) => "CSV cell",
            _ => "JSON location",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Lowercased substring after the last `.` (the whole name if there is none).
pub fn file_extension(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => lower,
    }
}

// =============================================================================
// Uploaded File
// =============================================================================

/// A file selected for validation.
///
/// `S` is whatever handle the validator reads bytes from: a browser `File`,
/// an in-memory buffer, ...
#[derive(Debug, Clone)]
pub struct UploadedFile<S> {
    /// Original file name
    pub name: String,
    /// Opaque byte source
    pub source: S,
}

impl<S> UploadedFile<S> {
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Lowercased extension of the file name.
    pub fn extension(&self) -> String {
        file_extension(&self.name)
    }

    /// Recognized format, if any.
    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_filename(&self.name)
    }
}

// =============================================================================
// Validator Output
// =============================================================================

/// A finding as reported by the validator, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFinding {
    /// CSV cell reference or JSON location
    #[serde(default)]
    pub path: String,
    /// Human readable description
    pub message: String,
    /// Warning-flagged findings are not required changes
    #[serde(default)]
    pub warning: bool,
}

impl RawFinding {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            warning: false,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            warning: true,
        }
    }
}

/// Result of one `validate_csv` / `validate_json` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOutput {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<RawFinding>,
    /// Only supplied by validator versions that report alerts
    #[serde(default)]
    pub alerts: Option<Vec<RawFinding>>,
}

// =============================================================================
// Classified Findings
// =============================================================================

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which list of the validator a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Error,
    Alert,
}

/// A classified finding, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub path: String,
    pub message: String,
    pub severity: Severity,
    pub category: FindingCategory,
}

impl ValidationFinding {
    /// Classify a raw finding taken from the validator's `errors` list.
    pub fn from_error(raw: RawFinding) -> Self {
        Self::classify(raw, FindingCategory::Error)
    }

    /// Classify a raw finding taken from the validator's `alerts` list.
    pub fn from_alert(raw: RawFinding) -> Self {
        Self::classify(raw, FindingCategory::Alert)
    }

    fn classify(raw: RawFinding, category: FindingCategory) -> Self {
        Self {
            path: raw.path,
            message: raw.message,
            severity: if raw.warning {
                Severity::Warning
            } else {
                Severity::Error
            },
            category,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// Visual class of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Info => "usa-alert--info",
            AlertKind::Success => "usa-alert--success",
            AlertKind::Warning => "usa-alert--warning",
            AlertKind::Error => "usa-alert--error",
        }
    }
}

/// A single classified message for the wizard or generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            AlertKind::Info => "info",
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        };
        write!(f, "[{}] {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("Test.CSV"), "csv");
        assert_eq!(file_extension("a.b.json"), "json");
        assert_eq!(file_extension("README"), "readme");
        assert_eq!(file_extension("archive."), "");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_filename("mrf.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_filename("MRF.JSON"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_filename("mrf.xlsx"), None);
        assert_eq!(FileFormat::from_filename("csv"), Some(FileFormat::Csv));
    }

    #[test]
    fn test_location_header() {
        assert_eq!(FileFormat::location_header(Some(FileFormat::Csv)), "CSV cell");
        assert_eq!(FileFormat::location_header(Some(FileFormat::Json)), "JSON location");
        assert_eq!(FileFormat::location_header(None), "JSON location");
    }

    #[test]
    fn test_classification() {
        let finding = ValidationFinding::from_error(RawFinding::warning("C4", "odd"));
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.category, FindingCategory::Error);

        let alert = ValidationFinding::from_alert(RawFinding::error("/x", "nine 9s"));
        assert_eq!(alert.severity, Severity::Error);
        assert_eq!(alert.category, FindingCategory::Alert);
    }

    #[test]
    fn test_output_deserialization_defaults() {
        let json = r#"{"valid": false, "errors": [{"path": "B2", "message": "bad"}]}"#;
        let output: ValidatorOutput = serde_json::from_str(json).unwrap();

        assert!(!output.valid);
        assert_eq!(output.errors.len(), 1);
        assert!(!output.errors[0].warning);
        assert!(output.alerts.is_none());
    }
}
