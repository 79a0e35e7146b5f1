//! Field validation for the TXT generator.
//!
//! The record list always yields exactly one [`Alert`]; the first rule that
//! applies wins. The email and URL rules fire when *some* record has a value
//! and *some* record (possibly another, possibly a blank one) fails the check.

use once_cell::sync::Lazy;
use regex::Regex;

use super::records::HospitalRecord;
use crate::models::Alert;

const HOST: &str = r"[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?";

/// `www.<host>.<tld...>` anywhere in the value
static WWW_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"www\.{}\.\S{{2,}}", HOST)).expect("www url pattern is a valid regex")
});

/// Start of an `http(s)://` URL
static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://").expect("scheme pattern is a valid regex"));

/// `http(s)://[www.]<host>.<tld...>`, anchored at a scheme occurrence
static SCHEME_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^https?://(www\.)?({})\.\S{{2,}}", HOST))
        .expect("scheme url pattern is a valid regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    ))
    .expect("email pattern is a valid regex")
});

/// Whether `value` contains a web address.
///
/// A bare scheme host may not start with `www` unless it is `www.` itself.
pub fn is_valid_url(value: &str) -> bool {
    if WWW_URL.is_match(value) {
        return true;
    }
    SCHEME.find_iter(value).any(|m| {
        SCHEME_URL
            .captures(&value[m.start()..])
            .is_some_and(|caps| {
                caps.get(1).is_some()
                    || caps.get(2).is_some_and(|host| !host.as_str().starts_with("www"))
            })
    })
}

/// Whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL.is_match(value)
}

/// Some record has a value for the field and some record fails the check.
fn field_fails(
    records: &[HospitalRecord],
    field: fn(&HospitalRecord) -> &str,
    valid: fn(&str) -> bool,
) -> bool {
    records.iter().any(|r| !field(r).is_empty()) && records.iter().any(|r| !valid(field(r)))
}

/// Classify a record list.
pub fn check_records(records: &[HospitalRecord]) -> Alert {
    if records.len() == 1 && records[0].is_blank() {
        return Alert::info("Fill in hospital fields to generate file");
    }

    if field_fails(records, |r| r.contact_email.as_str(), is_valid_email) {
        return Alert::error("Not a valid point-of-contact email");
    }
    if field_fails(records, |r| r.mrf_url.as_str(), is_valid_url) {
        return Alert::error("Not a valid machine-readable file URL");
    }
    if field_fails(records, |r| r.source_page_url.as_str(), is_valid_url) {
        return Alert::error("Not a valid source page URL");
    }

    if records.iter().all(HospitalRecord::is_complete) {
        Alert::success("Generated file is valid")
    } else {
        Alert::error("All fields must be filled in for each hospital")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertKind;

    fn complete() -> HospitalRecord {
        HospitalRecord {
            name: "Example Hospital".into(),
            source_page_url: "https://example.org/prices".into(),
            mrf_url: "https://example.org/123456789_example_standardcharges.json".into(),
            contact_name: "Jo Smith".into(),
            contact_email: "jo@example.org".into(),
        }
    }

    #[test]
    fn test_single_blank_record_is_info() {
        let alert = check_records(&[HospitalRecord::default()]);
        assert_eq!(alert, Alert::info("Fill in hospital fields to generate file"));

        let whitespace = HospitalRecord {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(check_records(&[whitespace]).kind, AlertKind::Info);
    }

    #[test]
    fn test_complete_records_are_valid() {
        assert_eq!(
            check_records(&[complete(), complete()]),
            Alert::success("Generated file is valid")
        );
    }

    #[test]
    fn test_bad_email_anywhere_fails() {
        let bad = HospitalRecord {
            contact_email: "not-an-email".into(),
            ..Default::default()
        };
        assert_eq!(
            check_records(&[bad, HospitalRecord::default()]),
            Alert::error("Not a valid point-of-contact email")
        );
    }

    #[test]
    fn test_blank_email_fails_once_another_is_filled() {
        let blank_email = HospitalRecord {
            contact_email: String::new(),
            ..complete()
        };
        assert_eq!(
            check_records(&[complete(), blank_email]).message,
            "Not a valid point-of-contact email"
        );
    }

    #[test]
    fn test_rule_order() {
        let record = HospitalRecord {
            mrf_url: "example".into(),
            source_page_url: "example".into(),
            ..complete()
        };
        assert_eq!(
            check_records(&[record.clone()]).message,
            "Not a valid machine-readable file URL"
        );

        let record = HospitalRecord {
            mrf_url: "https://example.org/mrf.csv".into(),
            ..record
        };
        assert_eq!(check_records(&[record]).message, "Not a valid source page URL");
    }

    #[test]
    fn test_missing_fields() {
        let unnamed = HospitalRecord {
            name: "  ".into(),
            ..complete()
        };
        assert_eq!(
            check_records(&[unnamed, complete()]),
            Alert::error("All fields must be filled in for each hospital")
        );

        let no_contact = HospitalRecord {
            contact_name: String::new(),
            ..complete()
        };
        assert_eq!(
            check_records(&[complete(), no_contact]).message,
            "All fields must be filled in for each hospital"
        );
    }

    #[test]
    fn test_url_pattern() {
        assert!(is_valid_url("https://example.org/path"));
        assert!(is_valid_url("http://a.io"));
        assert!(is_valid_url("https://www.example.org"));
        assert!(is_valid_url("www.example.org"));
        assert!(is_valid_url("see www.my-hospital.org/prices"));
        assert!(is_valid_url("https://my-hospital.org"));

        assert!(!is_valid_url("example.org"));
        assert!(!is_valid_url("https://wwwexample.org"));
        assert!(!is_valid_url("https://-bad.org"));
        assert!(!is_valid_url("https://example"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("jo@example.org"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jo@example"));
        assert!(!is_valid_email(".jo@example.org"));
        assert!(!is_valid_email("jo@@example.org"));
        assert!(!is_valid_email(""));
    }
}
