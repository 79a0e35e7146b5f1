//! Online validator page.

use std::cell::RefCell;
use std::rc::Rc;

use hpt_toolkit::{
    results_artifact, DownloadSlot, RunStatus, UploadedFile, ValidationOptions, ValidationSession,
};
use leptos::*;
use web_sys::File;

use crate::components::{FileInput, ValidationResults};
use crate::config::{ACCEPTED_FILE_TYPES, SCHEMA_VERSIONS};
use crate::services::{BlobUrlFactory, JsValidator, SessionStore};

type BrowserSession = ValidationSession<JsValidator, SessionStore>;

#[component]
pub fn ValidatorPage() -> impl IntoView {
    let session: Rc<BrowserSession> = Rc::new(ValidationSession::new(
        JsValidator,
        SessionStore,
        ValidationOptions::default(),
    ));
    let max_findings = session.max_findings();

    let snapshot = create_rw_signal(session.snapshot());
    session.subscribe(move |s| snapshot.set(s.clone()));

    let filename_valid = {
        let session = session.clone();
        Signal::derive(move || {
            snapshot.track();
            session.filename_valid()
        })
    };

    let on_file = {
        let session = session.clone();
        Callback::new(move |file: Option<File>| {
            let Some(file) = file else {
                return;
            };
            let session = session.clone();
            spawn_local(async move {
                session.submit(&UploadedFile::new(file.name(), file)).await;
            });
        })
    };

    let on_schema_change = {
        let session = session.clone();
        move |ev: web_sys::Event| session.set_schema_version(event_target_value(&ev))
    };
    let selected_version = session.schema_version();

    // One live results URL, replaced on every completed run
    let slot = RefCell::new(DownloadSlot::new(BlobUrlFactory));
    let (download_url, set_download_url) = create_signal(None::<String>);
    create_effect(move |_| {
        let current = snapshot.get();
        let mut slot = slot.borrow_mut();

        if current.status() != RunStatus::Complete {
            slot.clear();
            set_download_url.set(None);
            return;
        }

        match slot.replace(&results_artifact(&current)) {
            Ok(url) => set_download_url.set(Some(url.to_string())),
            Err(e) => {
                log::warn!("Results download unavailable: {}", e);
                set_download_url.set(None);
            }
        }
    });

    let versions = SCHEMA_VERSIONS
        .iter()
        .map(|version| {
            view! {
                <option value={*version} selected={selected_version == *version}>
                    {*version}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="bg-base-lightest">
            <section class="grid-container usa-section">
                <div class="grid-row grid-gap">
                    <div class="desktop:grid-col-6 bg-white flex-align-self-start margin-bottom-4">
                        <form action="" method="GET">
                            <div class="usa-form-group">
                                <label class="usa-label" for="file-input">
                                    <p class="font-sans-xl text-bold margin-bottom-0">"Upload file"</p>
                                    "Files must be in a required CMS template format (.json or .csv)"
                                </label>
                                <FileInput
                                    id="file-input"
                                    name="file-input"
                                    accept=ACCEPTED_FILE_TYPES
                                    on_change=on_file
                                />
                            </div>
                            <div class="usa-form-group">
                                <label class="usa-label text-bold" for="schema-version">
                                    "Schema version"
                                </label>
                                <select
                                    class="usa-select"
                                    id="schema-version"
                                    name="schema-version"
                                    on:change=on_schema_change
                                >
                                    {versions}
                                </select>
                            </div>
                        </form>
                        <Show when=move || snapshot.with(|s| s.loading) fallback=|| view! {}>
                            <p aria-live="polite" aria-atomic="true" class="text-bold">
                                {move || snapshot.with(|s| format!("Loading file {}...", s.filename))}
                            </p>
                        </Show>
                    </div>
                    <div class="desktop:grid-col-6 usa-prose">
                        <h1>"About This Tool"</h1>
                        <p>
                            <strong>
                                "Please note: Leveraging the Validator helps ensure adherence to CMS \
                                 form and manner requirements (45 CFR 180.50(c)(2)), but it does not \
                                 certify that your MRF fully complies with all HPT requirements at \
                                 45 CFR 180.50."
                            </strong>
                        </p>
                        <p>
                            "The Online Validator reviews your uploaded MRF against the required CMS \
                             template layout and data specifications and reports 'errors' and \
                             'alerts'. It stops reviewing an MRF after "
                            {max_findings}
                            " errors, so address each error displayed and run your MRF through the \
                             validator again until no more errors are generated."
                        </p>
                        <p>
                            "The validator runs in your web browser and does not store, record, \
                             report, or share any information with CMS related to your hospital's \
                             use of the tool."
                        </p>
                    </div>
                </div>
            </section>
        </div>
        <section class="grid-container usa-section">
            <ValidationResults
                snapshot=snapshot
                filename_valid=filename_valid
                max_findings=max_findings
                download_url=download_url
            />
        </section>
    }
}
