//! The validator collaborator.
//!
//! Schema rules, CSV/JSON parsing and filename checks live behind
//! [`MrfValidator`]. The orchestrator, the wizard and the CLI only ever talk
//! to this trait:
//!
//! - in the browser it is backed by the `@cmsgov/hpt-validator` package
//!   (see the frontend's `services::validator`),
//! - natively by [`LocalValidator`] (feature `native`),
//! - in tests by small fakes.
//!
//! A validator *rejecting* a call (`Err`) means the file could not be read;
//! content problems are reported inside [`ValidatorOutput`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::MAX_FINDINGS;
use crate::error::ValidatorResult;
use crate::models::{FileFormat, ValidatorOutput};

#[cfg(feature = "native")]
mod local;

#[cfg(feature = "native")]
pub use local::LocalValidator;

/// Options understood by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Caps both the errors and the alerts collection at N.
    pub max_findings: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_findings: MAX_FINDINGS,
        }
    }
}

/// The three operations of the external validation library.
#[allow(async_fn_in_trait)]
pub trait MrfValidator {
    /// Handle the validator reads file bytes from.
    type Source;

    /// Validate a CSV MRF.
    async fn validate_csv(
        &self,
        source: &Self::Source,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput>;

    /// Validate a JSON MRF.
    async fn validate_json(
        &self,
        source: &Self::Source,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput>;

    /// Check a file name against the required naming pattern.
    fn validate_filename(&self, name: &str) -> bool;

    /// Dispatch on the file format.
    async fn validate(
        &self,
        format: FileFormat,
        source: &Self::Source,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput> {
        match format {
            FileFormat::Csv => self.validate_csv(source, schema_version, options).await,
            FileFormat::Json => self.validate_json(source, schema_version, options).await,
        }
    }
}

/// `<ein>[-<npi>]_<hospitalname>_standardcharges.<json|csv>`
static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}-?\d{7}(-\d{10})?_.+_standardcharges\.(json|csv)$")
        .expect("filename pattern is a valid regex")
});

/// The naming rule for MRF file names.
pub fn is_valid_mrf_filename(name: &str) -> bool {
    FILENAME_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filenames() {
        assert!(is_valid_mrf_filename("123456789_example-hospital_standardcharges.csv"));
        assert!(is_valid_mrf_filename("12-3456789_example_standardcharges.json"));
        assert!(is_valid_mrf_filename(
            "123456789-1234567890_example-hospital_standardcharges.json"
        ));
    }

    #[test]
    fn test_invalid_filenames() {
        assert!(!is_valid_mrf_filename("12345678_example_standardcharges.csv"));
        assert!(!is_valid_mrf_filename("123456789_example_standardcharges.xlsx"));
        assert!(!is_valid_mrf_filename("123456789__standardcharges.csv"));
        assert!(!is_valid_mrf_filename("123456789-12345_example_standardcharges.csv"));
    }

    #[test]
    fn test_default_options() {
        assert_eq!(ValidationOptions::default().max_findings, 250);
    }
}
