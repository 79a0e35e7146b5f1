//! Native reference validator.
//!
//! Checks the structure of v2.0 MRFs without a browser:
//!
//! - JSON documents against the embedded draft 7 schemas in `schemas/`
//!   (the document itself, then each `standard_charge_information` item),
//! - CSV files for the three header rows of the CMS template and the shape
//!   of each data row, with spreadsheet cell references (`A1`).
//!
//! Bytes are decoded with encoding auto-detection before CSV parsing, since
//! hospital exports are frequently Windows-1252.
//!
//! Estimated allowed amounts encoded as nine 9s (`999999999`) are reported
//! as alerts rather than errors. Both collections stop at `max_findings`.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{is_valid_mrf_filename, MrfValidator, ValidationOptions};
use crate::config::SCHEMA_VERSIONS;
use crate::error::{ValidatorError, ValidatorResult};
use crate::models::{RawFinding, ValidatorOutput};

static DOCUMENT_SCHEMA: Lazy<jsonschema::Validator> = Lazy::new(|| {
    compile(include_str!("../../schemas/hpt-v2.0-document.json"))
});

static CHARGE_ITEM_SCHEMA: Lazy<jsonschema::Validator> = Lazy::new(|| {
    compile(include_str!("../../schemas/hpt-v2.0-charge-item.json"))
});

fn compile(raw: &str) -> jsonschema::Validator {
    let schema: Value = serde_json::from_str(raw).expect("Invalid embedded schema");
    jsonschema::draft7::new(&schema).expect("Invalid embedded schema")
}

/// Placeholder amount CMS asks hospitals to replace with real dollar amounts.
const NINE_NINES: &str = "999999999";

/// General data element headers required in row 1 of a CSV MRF.
const CSV_GENERAL_HEADERS: &[&str] = &[
    "hospital_name",
    "last_updated_on",
    "version",
    "hospital_location",
    "hospital_address",
];

/// Prefix of the license header (`license_number|<state>`).
const CSV_LICENSE_PREFIX: &str = "license_number|";

/// Headers required in row 3 of a CSV MRF.
const CSV_DATA_HEADERS: &[&str] = &[
    "description",
    "code|1",
    "code|1|type",
    "setting",
    "standard_charge|gross",
    "standard_charge|discounted_cash",
];

const CSV_SETTINGS: &[&str] = &["inpatient", "outpatient", "both"];

/// Reference implementation of [`MrfValidator`] over in-memory bytes.
#[derive(Debug, Clone, Default)]
pub struct LocalValidator;

impl LocalValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_version(schema_version: &str) -> ValidatorResult<()> {
        if SCHEMA_VERSIONS.contains(&schema_version) {
            Ok(())
        } else {
            Err(ValidatorError::UnknownSchemaVersion(schema_version.to_string()))
        }
    }
}

impl MrfValidator for LocalValidator {
    type Source = Vec<u8>;

    async fn validate_csv(
        &self,
        source: &Vec<u8>,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput> {
        Self::check_version(schema_version)?;
        let content = decode(source)?;
        validate_csv_content(&content, options.max_findings)
    }

    async fn validate_json(
        &self,
        source: &Vec<u8>,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput> {
        Self::check_version(schema_version)?;
        if source.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ValidatorError::Unreadable("file is empty".into()));
        }
        let document: Value = serde_json::from_slice(strip_bom(source))?;
        Ok(validate_json_document(&document, options.max_findings))
    }

    fn validate_filename(&self, name: &str) -> bool {
        is_valid_mrf_filename(name)
    }
}

// =============================================================================
// Decoding
// =============================================================================

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes)
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            "windows-1252".to_string()
        }
        other => other.to_string(),
    }
}

/// Decode file bytes to text, falling back to Windows-1252.
fn decode(bytes: &[u8]) -> ValidatorResult<String> {
    let bytes = strip_bom(bytes);
    if bytes.is_empty() {
        return Err(ValidatorError::Unreadable("file is empty".into()));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let encoding = detect_encoding(bytes);
    log::debug!("CSV is not UTF-8, detected encoding: {}", encoding);
    let decoder = encoding_rs::Encoding::for_label(encoding.as_bytes())
        .filter(|e| *e != encoding_rs::UTF_8)
        .unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, _, had_errors) = decoder.decode(bytes);
    if had_errors {
        return Err(ValidatorError::Unreadable(format!(
            "could not decode file as {}",
            decoder.name()
        )));
    }
    Ok(text.into_owned())
}

// =============================================================================
// Findings collector
// =============================================================================

/// Accumulates findings until the cap is reached.
struct Findings {
    max: usize,
    errors: Vec<RawFinding>,
    alerts: Vec<RawFinding>,
}

impl Findings {
    fn new(max: usize) -> Self {
        Self {
            max,
            errors: Vec::new(),
            alerts: Vec::new(),
        }
    }

    fn error_count(&self) -> usize {
        self.errors.iter().filter(|f| !f.warning).count()
    }

    fn is_full(&self) -> bool {
        self.errors.len() >= self.max
    }

    fn push(&mut self, finding: RawFinding) {
        if !self.is_full() {
            self.errors.push(finding);
        }
    }

    fn push_alert(&mut self, finding: RawFinding) {
        if self.alerts.len() < self.max {
            self.alerts.push(finding);
        }
    }

    fn finish(self) -> ValidatorOutput {
        let valid = self.error_count() == 0;
        ValidatorOutput {
            valid,
            errors: self.errors,
            alerts: Some(self.alerts),
        }
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Schema violations of `data` as findings located under `base`.
fn schema_findings(schema: &jsonschema::Validator, data: &Value, base: &str) -> Vec<RawFinding> {
    schema
        .iter_errors(data)
        .map(|e| {
            let location = e.instance_path().as_str();
            let path = match (base, location) {
                ("", "") => "/".to_string(),
                _ => format!("{}{}", base, location),
            };
            RawFinding::error(path, e.to_string())
        })
        .collect()
}

fn validate_json_document(document: &Value, max: usize) -> ValidatorOutput {
    let mut findings = Findings::new(max);

    for finding in schema_findings(&DOCUMENT_SCHEMA, document, "") {
        findings.push(finding);
    }

    let items = document
        .get("standard_charge_information")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (i, item) in items.iter().enumerate() {
        if findings.is_full() {
            break;
        }
        let path = format!("/standard_charge_information/{}", i);
        for finding in schema_findings(&CHARGE_ITEM_SCHEMA, item, &path) {
            findings.push(finding);
        }
        collect_json_alerts(item, &path, &mut findings);
    }

    findings.finish()
}

fn collect_json_alerts(item: &Value, path: &str, findings: &mut Findings) {
    let charges = item
        .get("standard_charges")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (j, charge) in charges.iter().enumerate() {
        let payers = charge
            .get("payers_information")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (k, payer) in payers.iter().enumerate() {
            let is_placeholder = match payer.get("estimated_amount") {
                Some(Value::Number(n)) => n.to_string() == NINE_NINES,
                Some(Value::String(s)) => s.trim() == NINE_NINES,
                _ => false,
            };
            if is_placeholder {
                findings.push_alert(RawFinding::error(
                    format!(
                        "{}/standard_charges/{}/payers_information/{}/estimated_amount",
                        path, j, k
                    ),
                    "Estimated allowed amount is encoded as 999999999; replace it with the actual dollar amount",
                ));
            }
        }
    }
}

// =============================================================================
// CSV
// =============================================================================

/// Spreadsheet column letters for a zero-based index (0 -> A, 26 -> AA).
pub fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Cell reference for a zero-based column and a one-based row.
pub fn cell_ref(column: usize, row: usize) -> String {
    format!("{}{}", column_letters(column), row)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn validate_csv_content(content: &str, max: usize) -> ValidatorResult<ValidatorOutput> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ValidatorError::Unreadable(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if rows.is_empty() {
        return Err(ValidatorError::Unreadable("file is empty".into()));
    }

    let mut findings = Findings::new(max);
    let empty = Vec::new();
    let general_headers: Vec<String> = rows[0].iter().map(|h| normalize_header(h)).collect();
    let general_values = rows.get(1).unwrap_or(&empty);
    let data_headers: Vec<String> = rows
        .get(2)
        .map(|r| r.iter().map(|h| normalize_header(h)).collect())
        .unwrap_or_default();

    // Row 1: general data element headers
    for required in CSV_GENERAL_HEADERS {
        if !general_headers.iter().any(|h| h == required) {
            findings.push(RawFinding::error("A1", format!("Header row 1 is missing \"{}\"", required)));
        }
    }
    if !general_headers.iter().any(|h| h.starts_with(CSV_LICENSE_PREFIX)) {
        findings.push(RawFinding::error(
            "A1",
            format!("Header row 1 is missing \"{}<state>\"", CSV_LICENSE_PREFIX),
        ));
    }

    // Row 2: general data element values
    for (col, header) in general_headers.iter().enumerate() {
        let is_required = CSV_GENERAL_HEADERS.contains(&header.as_str());
        let value = general_values.get(col).map(|v| v.trim()).unwrap_or("");
        if is_required && value.is_empty() {
            findings.push(RawFinding::error(
                cell_ref(col, 2),
                format!("A value is required for \"{}\"", header),
            ));
        }
    }

    // Row 3: item/service, coding and standard charge headers
    if data_headers.is_empty() {
        findings.push(RawFinding::error("A3", "Header row 3 is missing"));
    }
    for required in CSV_DATA_HEADERS {
        if !data_headers.is_empty() && !data_headers.iter().any(|h| h == required) {
            findings.push(RawFinding::error("A3", format!("Header row 3 is missing \"{}\"", required)));
        }
    }

    // Errors in rows 1 through 3 stop the review.
    if findings.error_count() > 0 {
        return Ok(findings.finish());
    }

    let column = |name: &str| data_headers.iter().position(|h| h == name);
    let description_col = column("description");
    let setting_col = column("setting");
    let gross_col = column("standard_charge|gross");
    let cash_col = column("standard_charge|discounted_cash");
    let estimated_cols: Vec<usize> = data_headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("estimated_amount"))
        .map(|(i, _)| i)
        .collect();

    for (offset, row) in rows.iter().enumerate().skip(3) {
        if findings.is_full() {
            break;
        }
        let row_number = offset + 1;
        if row.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        if row.len() != data_headers.len() {
            findings.push(RawFinding::error(
                cell_ref(0, row_number),
                format!(
                    "Row has {} columns but the header row has {}",
                    row.len(),
                    data_headers.len()
                ),
            ));
            continue;
        }

        let value = move |col: Option<usize>| col.and_then(|c| row.get(c)).map(|v| v.trim()).unwrap_or("");

        if let Some(col) = description_col {
            if value(Some(col)).is_empty() {
                findings.push(RawFinding::error(cell_ref(col, row_number), "\"description\" is required"));
            }
        }

        if let Some(col) = setting_col {
            let setting = value(Some(col)).to_lowercase();
            if !CSV_SETTINGS.contains(&setting.as_str()) {
                findings.push(RawFinding::error(
                    cell_ref(col, row_number),
                    format!(
                        "\"setting\" value \"{}\" is not one of: {}",
                        value(Some(col)),
                        CSV_SETTINGS.join(", ")
                    ),
                ));
            }
        }

        for col in [gross_col, cash_col].into_iter().flatten() {
            let amount = value(Some(col));
            if !amount.is_empty() && amount.parse::<f64>().map_or(true, |v| v <= 0.0) {
                findings.push(RawFinding::error(
                    cell_ref(col, row_number),
                    format!("\"{}\" value \"{}\" must be a positive number", data_headers[col], amount),
                ));
            }
        }

        if value(gross_col).is_empty() && value(cash_col).is_empty() {
            findings.push(RawFinding::warning(
                cell_ref(0, row_number),
                "Row has neither a gross charge nor a discounted cash price",
            ));
        }

        for &col in &estimated_cols {
            if value(Some(col)) == NINE_NINES {
                findings.push_alert(RawFinding::error(
                    cell_ref(col, row_number),
                    "Estimated allowed amount is encoded as 999999999; replace it with the actual dollar amount",
                ));
            }
        }
    }

    Ok(findings.finish())
}
