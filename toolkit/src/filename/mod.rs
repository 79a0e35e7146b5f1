//! MRF file naming wizard.
//!
//! Composes `<ein>[-<npi>]_<hospitalname>_standardcharges.<format>` from the
//! wizard fields and explains why a composed name is rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::WIZARD_STORAGE_KEY;
use crate::models::{Alert, FileFormat};
use crate::storage::{KeyValueStore, PersistedState};
use crate::validation::MrfValidator;

static EIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-?\d{7}$").expect("EIN pattern is a valid regex"));

static NPI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("NPI pattern is a valid regex"));

/// The wizard inputs.
///
/// Serialized with the key names the browser session has always used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameFields {
    pub ein: String,
    #[serde(rename = "name")]
    pub hospital_location_name: String,
    #[serde(rename = "fileType")]
    pub file_type: Option<FileFormat>,
    /// Unanswered until the user picks yes or no
    #[serde(rename = "showNpi")]
    pub include_npi: Option<bool>,
    pub npi: String,
}

impl FilenameFields {
    fn wants_npi(&self) -> bool {
        self.include_npi == Some(true) && !self.npi.is_empty()
    }

    /// Hospital name, ein and file type are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.hospital_location_name.trim().is_empty()
            && !self.ein.trim().is_empty()
            && self.file_type.is_some()
    }
}

/// Build the file name, with `<ein>`, `<hospitalname>` and `<format>`
/// standing in for blank fields.
pub fn compose(fields: &FilenameFields) -> String {
    let ein = fields.ein.replace('-', "");
    let ein = if ein.is_empty() { "<ein>" } else { ein.as_str() };

    let npi = if fields.wants_npi() {
        format!("-{}", fields.npi)
    } else {
        String::new()
    };

    let name: String = fields
        .hospital_location_name
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase();
    let name = if name.is_empty() { "<hospitalname>" } else { name.as_str() };

    let format = fields.file_type.map_or("<format>", |f| f.extension());

    format!("{}{}_{}_standardcharges.{}", ein, npi, name, format)
}

/// The composed name, only once the required fields are filled in.
pub fn candidate(fields: &FilenameFields) -> Option<String> {
    fields.is_complete().then(|| compose(fields))
}

/// Classify the current fields.
pub fn check_validity<V: MrfValidator>(fields: &FilenameFields, validator: &V) -> Alert {
    let Some(name) = candidate(fields) else {
        return Alert::info("Enter required parameters to validate file name");
    };

    if validator.validate_filename(&name) {
        return Alert::success("File name is valid");
    }

    if !EIN.is_match(&fields.ein) {
        Alert::error("EIN must be 9 digits in the format XXXXXXXXX")
    } else if fields.wants_npi() && !NPI.is_match(&fields.npi) {
        Alert::error("NPI must be 10 digits with no dashes")
    } else {
        Alert::error("File name is invalid")
    }
}

// =============================================================================
// Persisted wizard
// =============================================================================

/// Wizard fields kept in durable storage across page loads.
pub struct FilenameWizard<S: KeyValueStore> {
    state: PersistedState<FilenameFields, S>,
    fields: FilenameFields,
}

impl<S: KeyValueStore> FilenameWizard<S> {
    /// Restore the fields saved in `store`, or start blank.
    pub fn new(store: S) -> Self {
        let state = PersistedState::new(store, WIZARD_STORAGE_KEY);
        let fields = state.load();
        Self { state, fields }
    }

    pub fn fields(&self) -> &FilenameFields {
        &self.fields
    }

    /// Change the fields and save them.
    pub fn update(&mut self, change: impl FnOnce(&mut FilenameFields)) {
        change(&mut self.fields);
        if let Err(e) = self.state.save(&self.fields) {
            log::warn!("Failed to persist filename wizard: {}", e);
        }
    }

    pub fn filename(&self) -> String {
        compose(&self.fields)
    }

    pub fn alert<V: MrfValidator>(&self, validator: &V) -> Alert {
        check_validity(&self.fields, validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidatorResult;
    use crate::models::{AlertKind, ValidatorOutput};
    use crate::storage::MemoryStore;
    use crate::validation::{is_valid_mrf_filename, ValidationOptions};
    use std::cell::RefCell;

    /// Filename-only validator that records what it was asked.
    #[derive(Default)]
    struct NamingRule {
        asked: RefCell<Vec<String>>,
    }

    impl MrfValidator for NamingRule {
        type Source = ();

        async fn validate_csv(
            &self,
            _: &(),
            _: &str,
            _: &ValidationOptions,
        ) -> ValidatorResult<ValidatorOutput> {
            Ok(ValidatorOutput::default())
        }

        async fn validate_json(
            &self,
            _: &(),
            _: &str,
            _: &ValidationOptions,
        ) -> ValidatorResult<ValidatorOutput> {
            Ok(ValidatorOutput::default())
        }

        fn validate_filename(&self, name: &str) -> bool {
            self.asked.borrow_mut().push(name.to_string());
            is_valid_mrf_filename(name)
        }
    }

    fn fields(ein: &str, name: &str) -> FilenameFields {
        FilenameFields {
            ein: ein.into(),
            hospital_location_name: name.into(),
            file_type: Some(FileFormat::Csv),
            include_npi: Some(false),
            npi: String::new(),
        }
    }

    #[test]
    fn test_compose() {
        assert_eq!(
            compose(&fields("123456789", "Example Hospital")),
            "123456789_example-hospital_standardcharges.csv"
        );
        assert_eq!(
            compose(&fields("12-3456789", "A\tB  C")),
            "123456789_a-b--c_standardcharges.csv"
        );
    }

    #[test]
    fn test_compose_placeholders() {
        assert_eq!(
            compose(&FilenameFields::default()),
            "<ein>_<hospitalname>_standardcharges.<format>"
        );
    }

    #[test]
    fn test_compose_npi() {
        let mut with_npi = fields("123456789", "Example");
        with_npi.npi = "1234567890".into();
        assert_eq!(compose(&with_npi), "123456789_example_standardcharges.csv");

        with_npi.include_npi = Some(true);
        assert_eq!(
            compose(&with_npi),
            "123456789-1234567890_example_standardcharges.csv"
        );
    }

    #[test]
    fn test_incomplete_fields_never_reach_validator() {
        let rule = NamingRule::default();
        let mut incomplete = fields("123456789", "  ");
        assert_eq!(
            check_validity(&incomplete, &rule),
            Alert::info("Enter required parameters to validate file name")
        );

        incomplete.hospital_location_name = "Example".into();
        incomplete.file_type = None;
        assert_eq!(check_validity(&incomplete, &rule).kind, AlertKind::Info);
        assert!(rule.asked.borrow().is_empty());
    }

    #[test]
    fn test_valid_name() {
        let rule = NamingRule::default();
        assert_eq!(
            check_validity(&fields("12-3456789", "Example Hospital"), &rule),
            Alert::success("File name is valid")
        );
        assert_eq!(
            *rule.asked.borrow(),
            vec!["123456789_example-hospital_standardcharges.csv".to_string()]
        );
    }

    #[test]
    fn test_error_explanations() {
        let rule = NamingRule::default();
        assert_eq!(
            check_validity(&fields("1234", "Example"), &rule).message,
            "EIN must be 9 digits in the format XXXXXXXXX"
        );

        let mut bad_npi = fields("123456789", "Example");
        bad_npi.include_npi = Some(true);
        bad_npi.npi = "123-456".into();
        assert_eq!(
            check_validity(&bad_npi, &rule).message,
            "NPI must be 10 digits with no dashes"
        );
    }

    #[test]
    fn test_wizard_persists_every_change() {
        let store = MemoryStore::new();
        let mut wizard = FilenameWizard::new(store.clone());
        wizard.update(|f| f.ein = "123456789".into());
        wizard.update(|f| f.hospital_location_name = "Example".into());

        let restored = FilenameWizard::new(store.clone());
        assert_eq!(restored.fields().ein, "123456789");
        assert_eq!(restored.fields().hospital_location_name, "Example");
        assert_eq!(restored.fields().include_npi, None);

        let raw = store.get(WIZARD_STORAGE_KEY).unwrap();
        assert!(raw.contains("\"name\":\"Example\""));
        assert!(raw.contains("\"showNpi\":null"));
    }
}
