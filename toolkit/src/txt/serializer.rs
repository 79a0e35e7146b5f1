//! The `cms-hpt.txt` text format.
//!
//! ```text
//! location-name: <name>
//! source-page-url: <url>
//! mrf-url: <url>
//! contact-name: <name>
//! contact-email: <email>
//!
//! location-name: ...
//! ```
//!
//! One block per record, blocks separated by a single blank line, no
//! trailing newline.

use super::records::HospitalRecord;
use crate::artifact::Artifact;
use crate::config::TXT_FILE_NAME;

/// Field labels in file order.
pub const LABELS: [&str; 5] = [
    "location-name",
    "source-page-url",
    "mrf-url",
    "contact-name",
    "contact-email",
];

/// Render records as `cms-hpt.txt` contents.
pub fn serialize(records: &[HospitalRecord]) -> String {
    records
        .iter()
        .map(|record| {
            LABELS
                .iter()
                .zip(record.fields())
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Read `cms-hpt.txt` contents back into records.
///
/// Unknown labels and lines without a `:` are skipped.
pub fn parse(text: &str) -> Vec<HospitalRecord> {
    let mut records = Vec::new();
    let mut current: Option<HospitalRecord> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            records.extend(current.take());
            continue;
        }

        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.strip_prefix(' ').unwrap_or(value).to_string();
        let record = current.get_or_insert_with(HospitalRecord::default);

        match label.trim() {
            "location-name" => record.name = value,
            "source-page-url" => record.source_page_url = value,
            "mrf-url" => record.mrf_url = value,
            "contact-name" => record.contact_name = value,
            "contact-email" => record.contact_email = value,
            other => log::debug!("Skipping unknown label '{}'", other),
        }
    }
    records.extend(current);

    records
}

/// The serialized records as a downloadable `cms-hpt.txt`.
pub fn txt_artifact(records: &[HospitalRecord]) -> Artifact {
    Artifact::plain_text(TXT_FILE_NAME, serialize(records))
}
