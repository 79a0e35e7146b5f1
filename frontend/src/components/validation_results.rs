//! Results of the latest validation run.

use hpt_toolkit::{AlertKind, RunStatus, ValidationFinding, ValidationSnapshot};
use leptos::*;

use super::AlertBox;
use crate::config::{MRF_GUIDE_URL, RESULTS_FILE_NAME};

#[component]
fn FindingsTable(
    location_header: &'static str,
    description: &'static str,
    findings: Vec<ValidationFinding>,
) -> impl IntoView {
    let rows = findings
        .into_iter()
        .map(|f| {
            view! {
                <tr>
                    <td>{f.path}</td>
                    <td>{f.message}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="usa-table usa-table--borderless usa-table--striped width-full">
            <thead>
                <tr>
                    <th scope="col">{location_header}</th>
                    <th scope="col">{description}</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
fn Filename(filename: String) -> impl IntoView {
    view! { <span class="text-underline">{filename}</span> }
}

/// Filename check, errors, warnings and alerts of a completed run.
#[component]
fn CompletedRun(snapshot: ValidationSnapshot, filename_valid: bool, max_findings: usize) -> impl IntoView {
    let header = snapshot.location_header();
    let filename = snapshot.filename.clone();

    let filename_alert = if filename_valid {
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Success>
                <span class="text-bold">"Filename valid"</span>": "
                <Filename filename=filename.clone()/>
            </AlertBox>
        }
        .into_view()
    } else {
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Error>
                <span class="text-bold">"Filename invalid"</span>": "
                <Filename filename=filename.clone()/>
                <br/>
                <span>
                    "Must match format: <ein>_<hospitalname>_standardcharges.[json|csv]. "
                    <a href="/filename-wizard">"Click here to use the file name wizard."</a>
                </span>
            </AlertBox>
        }
        .into_view()
    };

    let errors_alert = if snapshot.valid {
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Success>
                <span class="text-bold">"No errors found in file"</span>": "
                <Filename filename=filename.clone()/>
            </AlertBox>
        }
        .into_view()
    } else {
        let summary = snapshot.error_summary(max_findings);
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Error>
                <span class="text-bold">{format!("{} found in file", summary)}</span>": "
                <Filename filename=filename.clone()/>
            </AlertBox>
        }
        .into_view()
    };

    let errors = (!snapshot.errors.is_empty()).then(|| {
        view! {
            <FindingsTable
                location_header=header
                description="Error description"
                findings=snapshot.errors.clone()
            />
            <p>
                "For further information about resolving these issues, please refer to the document: "
                <a href=MRF_GUIDE_URL>"8 Steps to a Machine-Readable File"</a>
            </p>
        }
    });

    let warnings_alert = if snapshot.warnings.is_empty() {
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Success>
                <span class="text-bold">"No warnings found in file"</span>": "
                <Filename filename=filename.clone()/>
            </AlertBox>
        }
        .into_view()
    } else {
        let summary = snapshot.warning_summary();
        let filename = filename.clone();
        view! {
            <AlertBox kind=AlertKind::Warning>
                <span class="text-bold">{format!("{} for file", summary)}</span>": "
                <Filename filename=filename.clone()/>
                <br/>
                <span>
                    "These items are not required changes, but addressing them could save time in the future."
                </span>
            </AlertBox>
        }
        .into_view()
    };

    let warnings = (!snapshot.warnings.is_empty()).then(|| {
        view! {
            <FindingsTable
                location_header=header
                description="Error description"
                findings=snapshot.warnings.clone()
            />
        }
    });

    let alerts = (!snapshot.alerts.is_empty()).then(|| {
        let summary = snapshot.alert_summary(max_findings);
        view! {
            <h3>"Alerts"</h3>
            <AlertBox kind=AlertKind::Warning>
                <span class="text-bold">{format!("{} for file", summary)}</span>": "
                <Filename filename=filename.clone()/>
            </AlertBox>
            <FindingsTable
                location_header=header
                description="Alert description"
                findings=snapshot.alerts.clone()
            />
        }
    });

    view! {
        <h3>"Filename"</h3>
        {filename_alert}
        <h3>"Errors"</h3>
        {errors_alert}
        {errors}
        <h3>"Warnings"</h3>
        {warnings_alert}
        {warnings}
        {alerts}
        <p class="font-sans-2xs text-base">
            "Validator started: " {snapshot.start_timestamp.clone()}
            <br/>
            "Validator finished: " {snapshot.end_timestamp.clone()}
        </p>
    }
}

#[component]
pub fn ValidationResults(
    #[prop(into)] snapshot: Signal<ValidationSnapshot>,
    #[prop(into)] filename_valid: Signal<bool>,
    max_findings: usize,
    /// Object URL of the exported results
    #[prop(into)]
    download_url: Signal<Option<String>>,
) -> impl IntoView {
    let body = move || {
        let snapshot = snapshot.get();
        match snapshot.status() {
            RunStatus::Idle | RunStatus::Loading => ().into_view(),
            RunStatus::ReadError => view! {
                <AlertBox kind=AlertKind::Error>
                    <span class="text-bold">"File is not machine readable"</span>": "
                    <Filename filename=snapshot.filename.clone()/>
                </AlertBox>
            }
            .into_view(),
            RunStatus::UnsupportedFormat => view! {
                <AlertBox kind=AlertKind::Error>
                    <span class="text-bold">"Unsupported file type"</span>": "
                    <Filename filename=snapshot.filename.clone()/>
                    <br/>
                    <span>"Files must be in a required CMS template format (.json or .csv)"</span>
                </AlertBox>
            }
            .into_view(),
            RunStatus::Complete => view! {
                <CompletedRun
                    snapshot=snapshot
                    filename_valid=filename_valid.get()
                    max_findings=max_findings
                />
            }
            .into_view(),
        }
    };

    let show_download = move || {
        snapshot.with(|s| s.status() == RunStatus::Complete) && download_url.with(Option::is_some)
    };

    view! {
        <div class="grid-row grid-gap">
            <div class="usa-prose width-full">
                <div class="display-flex flex-justify">
                    <h2>"Validation results"</h2>
                    <Show when=show_download fallback=|| view! {}>
                        <a
                            class="usa-button margin-right-0"
                            href=move || download_url.get().unwrap_or_default()
                            download=RESULTS_FILE_NAME
                        >
                            "Download results"
                        </a>
                    </Show>
                </div>
                {body}
            </div>
        </div>
    }
}
