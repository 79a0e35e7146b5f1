//! Downloadable results export.

use super::snapshot::ValidationSnapshot;
use crate::artifact::Artifact;
use crate::config::{RESULTS_FILE_NAME, TOOL_VERSION};
use crate::models::ValidationFinding;

fn finding_row(finding: &ValidationFinding) -> String {
    format!(
        "\"{}\",\"{}\"",
        finding.path.replace('"', ""),
        finding.message.replace('"', "")
    )
}

/// Render a snapshot as the results CSV.
///
/// Errors come first (or `No errors found`), followed by an alerts section
/// when the run produced any.
pub fn render_results(snapshot: &ValidationSnapshot) -> String {
    let header = snapshot.location_header();
    let mut lines = vec![
        format!("Validating file: {}", snapshot.filename),
        format!("Validator version: {}", TOOL_VERSION),
        format!("Start time: {}", snapshot.start_timestamp),
        format!("End time: {}", snapshot.end_timestamp),
    ];

    if snapshot.errors.is_empty() {
        lines.push("No errors found".to_string());
    } else {
        lines.push(format!("{},Error description", header));
        lines.extend(snapshot.errors.iter().map(finding_row));
    }

    if !snapshot.alerts.is_empty() {
        lines.push(String::new());
        lines.push(format!("{},Alert description", header));
        lines.extend(snapshot.alerts.iter().map(finding_row));
    }

    lines.join("\n")
}

/// The results export as a downloadable artifact.
pub fn results_artifact(snapshot: &ValidationSnapshot) -> Artifact {
    Artifact::csv(RESULTS_FILE_NAME, render_results(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawFinding, ValidatorOutput};

    fn snapshot(errors: Vec<RawFinding>, alerts: Option<Vec<RawFinding>>) -> ValidationSnapshot {
        ValidationSnapshot::validation_succeeded(
            "mrf.csv",
            "v2.0",
            ValidatorOutput {
                valid: errors.is_empty(),
                errors,
                alerts,
            },
            "start".into(),
            "end".into(),
        )
    }

    #[test]
    fn test_clean_run() {
        let text = render_results(&snapshot(vec![], None));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Validating file: mrf.csv");
        assert_eq!(lines[1], format!("Validator version: {}", TOOL_VERSION));
        assert_eq!(lines[2], "Start time: start");
        assert_eq!(lines[3], "End time: end");
        assert_eq!(lines[4], "No errors found");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_errors_and_alerts() {
        let text = render_results(&snapshot(
            vec![RawFinding::error("B2", "value \"x\" is not allowed")],
            Some(vec![RawFinding::warning("F7", "nine 9s")]),
        ));
        let lines: Vec<&str> = text.lines().skip(4).collect();

        assert_eq!(
            lines,
            vec![
                "CSV cell,Error description",
                "\"B2\",\"value x is not allowed\"",
                "",
                "CSV cell,Alert description",
                "\"F7\",\"nine 9s\"",
            ]
        );
    }

    #[test]
    fn test_artifact_metadata() {
        let artifact = results_artifact(&snapshot(vec![], None));
        assert_eq!(artifact.file_name, "validation-results.csv");
        assert!(artifact.mime_type.starts_with("text/csv"));
    }
}
