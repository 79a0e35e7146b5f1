//! `cms-hpt.txt` generator page.

use std::cell::RefCell;

use hpt_toolkit::txt::{serialize, txt_artifact};
use hpt_toolkit::{check_records, AlertKind, DownloadSlot, HospitalRecord, HospitalRecordPatch, RecordList};
use leptos::*;

use crate::components::AlertMessage;
use crate::config::{TXT_FILE_NAME, TXT_RULE_URL};
use crate::services::BlobUrlFactory;

/// One editable field of a hospital record.
struct FieldSpec {
    slug: &'static str,
    label: &'static str,
    placeholder: &'static str,
    read: fn(&HospitalRecord) -> &str,
    write: fn(String) -> HospitalRecordPatch,
}

const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        slug: "name",
        label: "Hospital Location Name",
        placeholder: "Hospital Location Name",
        read: |r| r.name.as_str(),
        write: |v| HospitalRecordPatch { name: Some(v), ..Default::default() },
    },
    FieldSpec {
        slug: "source-page-url",
        label: "Source Page URL",
        placeholder: "Source page URL",
        read: |r| r.source_page_url.as_str(),
        write: |v| HospitalRecordPatch { source_page_url: Some(v), ..Default::default() },
    },
    FieldSpec {
        slug: "mrf-url",
        label: "Machine-Readable File URL",
        placeholder: "MRF URL",
        read: |r| r.mrf_url.as_str(),
        write: |v| HospitalRecordPatch { mrf_url: Some(v), ..Default::default() },
    },
    FieldSpec {
        slug: "contact-name",
        label: "POC Name",
        placeholder: "POC Name",
        read: |r| r.contact_name.as_str(),
        write: |v| HospitalRecordPatch { contact_name: Some(v), ..Default::default() },
    },
    FieldSpec {
        slug: "contact-email",
        label: "Contact Email",
        placeholder: "Contact Email",
        read: |r| r.contact_email.as_str(),
        write: |v| HospitalRecordPatch { contact_email: Some(v), ..Default::default() },
    },
];

#[component]
fn RecordForm(index: usize, records: RwSignal<RecordList>, count: Memo<usize>) -> impl IntoView {
    let inputs = FIELDS
        .iter()
        .map(|field| {
            let id = format!("{}-{}", field.slug, index);
            let read = field.read;
            let write = field.write;

            let value = move || {
                records.with(|r| r.get(index).map(|rec| read(rec).to_string()).unwrap_or_default())
            };
            let on_input = move |ev: web_sys::Event| {
                let patch = write(event_target_value(&ev));
                records.update(|r| {
                    if let Err(e) = r.update_record(index, patch) {
                        log::warn!("Record update ignored: {}", e);
                    }
                });
            };

            view! {
                <label class="usa-label margin-top-1" for=id.clone()>{field.label}</label>
                <input
                    class="usa-input"
                    id=id.clone()
                    name=id
                    type="text"
                    placeholder=field.placeholder
                    prop:value=value
                    on:input=on_input
                />
            }
        })
        .collect_view();

    let on_delete = move |_| {
        records.update(|r| {
            if let Err(e) = r.remove_record(index) {
                log::warn!("Record removal refused: {}", e);
            }
        });
    };

    view! {
        <div class="usa-form-group">
            {inputs}
            <Show when=move || { count.get() > 1 } fallback=|| view! {}>
                <button type="button" class="usa-button display-flex margin-top-2" on:click=on_delete>
                    "Delete"
                </button>
            </Show>
        </div>
    }
}

#[component]
pub fn TxtGeneratorPage() -> impl IntoView {
    let records = create_rw_signal(RecordList::new());
    // Forms are rebuilt only when records are added or removed
    let count = create_memo(move |_| records.with(RecordList::len));

    let alert = Signal::derive(move || records.with(|r| check_records(r.records())));
    let is_valid = move || alert.with(|a| a.kind == AlertKind::Success);
    let output = move || records.with(|r| serialize(r.records()));

    let slot = RefCell::new(DownloadSlot::new(BlobUrlFactory));
    let (download_url, set_download_url) = create_signal(String::new());
    create_effect(move |_| {
        let artifact = records.with(|r| txt_artifact(r.records()));
        match slot.borrow_mut().replace(&artifact) {
            Ok(url) => set_download_url.set(url.to_string()),
            Err(e) => log::warn!("TXT download unavailable: {}", e),
        }
    });

    let forms = move || {
        (0..count.get())
            .map(|index| view! { <RecordForm index=index records=records count=count/> })
            .collect_view()
    };

    view! {
        <div class="bg-base-lightest">
            <section class="grid-container usa-section">
                <div class="grid-row grid-gap">
                    <div class="desktop:grid-col-6 bg-white display-flex flex-column flex-align-self-start margin-bottom-4">
                        <h2 class="margin-bottom-0">"TXT File Generator"</h2>
                        <form action="" method="GET" on:submit=|ev| ev.prevent_default()>
                            {forms}
                        </form>
                        <button
                            type="button"
                            class="usa-button margin-top-2 flex-align-self-end margin-right-0"
                            on:click=move |_| {
                                records.update(|r| {
                                    r.add_record();
                                });
                            }
                        >
                            "Add"
                        </button>
                        <AlertMessage alert=alert/>
                        <hr class="width-full margin-top-3 margin-bottom-3"/>
                        <div class="grid-row generator-results-row">
                            <h3 class="margin-y-0">"Results"</h3>
                            <a
                                href=move || download_url.get()
                                download=TXT_FILE_NAME
                                class=move || {
                                    if is_valid() {
                                        "usa-button margin-right-0"
                                    } else {
                                        "usa-button margin-right-0 usa-button--disabled"
                                    }
                                }
                                on:click=move |ev| {
                                    if !is_valid() {
                                        ev.prevent_default();
                                    }
                                }
                            >
                                "Download"
                            </a>
                        </div>
                        <pre id="generator-output">{output}</pre>
                    </div>
                    <div class="desktop:grid-col-6 usa-prose">
                        <h2 class="margin-bottom-0">"TXT File Instructions"</h2>
                        <p>
                            "Each hospital must place a TXT file named \"cms-hpt.txt\" in the root folder \
                             of the public website that hosts its machine-readable file (MRF). A \
                             hospital with the website https://hospital.com would locate its file at \
                             https://hospital.com/cms-hpt.txt. See "
                            <a href=TXT_RULE_URL>"45 CFR 180.50 (d)(6)"</a>
                            "."
                        </p>
                        <p>
                            "If the MRF contains standard charge information for more than one \
                             location, add a separate entry for each location."
                        </p>
                        <table class="usa-table">
                            <thead>
                                <tr>
                                    <th>"Required Information"</th>
                                    <th>"Attribute: Value"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <tr><td>"Hospital Location Name"</td><td>"location-name: [hospital location name]"</td></tr>
                                <tr><td>"Source page URL"</td><td>"source-page-url: [URL]"</td></tr>
                                <tr><td>"Machine-readable file URL"</td><td>"mrf-url: [URL]"</td></tr>
                                <tr><td>"POC Name"</td><td>"contact-name: [name]"</td></tr>
                                <tr><td>"Contact email"</td><td>"contact-email: [email]"</td></tr>
                            </tbody>
                        </table>
                    </div>
                </div>
            </section>
        </div>
    }
}
