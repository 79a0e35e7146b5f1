//! MRF naming wizard page.

use hpt_toolkit::{check_validity, compose, FileFormat, FilenameFields, FilenameWizard};
use leptos::*;

use crate::components::AlertMessage;
use crate::config::NAMING_RULE_URL;
use crate::services::{copy_to_clipboard, JsValidator, SessionStore};

type Wizard = StoredValue<FilenameWizard<SessionStore>>;

/// Apply a change through the persisted wizard and publish the new fields.
fn edit(wizard: Wizard, fields: RwSignal<FilenameFields>, change: impl FnOnce(&mut FilenameFields)) {
    wizard.update_value(|w| w.update(change));
    fields.set(wizard.with_value(|w| w.fields().clone()));
}

#[component]
pub fn WizardPage() -> impl IntoView {
    let wizard: Wizard = store_value(FilenameWizard::new(SessionStore));
    let fields = create_rw_signal(wizard.with_value(|w| w.fields().clone()));

    let filename = move || fields.with(compose);
    let alert = Signal::derive(move || fields.with(|f| check_validity(f, &JsValidator)));

    let on_copy = move |_| {
        let text = filename();
        spawn_local(async move {
            if let Err(e) = copy_to_clipboard(&text).await {
                log::warn!("Copy failed: {}", e);
            }
        });
    };

    view! {
        <div class="bg-base-lightest height-full">
            <section class="grid-container usa-section">
                <div class="grid-row grid-gap">
                    <div class="desktop:grid-col-6 bg-white margin-x-auto">
                        <h1>"Format your file name"</h1>
                        <p>
                            "This tool helps you name your machine readable file in the \
                             CMS-specified naming convention as required at "
                            <a href=NAMING_RULE_URL>"45 CFR §180.50(d)(5)"</a>
                            "."
                        </p>
                        <p>"The output of the wizard automatically updates at the bottom of the form."</p>
                        <form class="usa-form margin-bottom-4" on:submit=|ev| ev.prevent_default()>
                            <label class="usa-label" for="hospital-ein">"EIN"</label>
                            <input
                                class="usa-input"
                                id="hospital-ein"
                                name="hospital-ein"
                                type="text"
                                prop:value=move || fields.with(|f| f.ein.clone())
                                on:input=move |ev| edit(wizard, fields, |f| f.ein = event_target_value(&ev))
                            />
                            <label class="usa-label" for="hospital-name">"Hospital name"</label>
                            <span class="usa-hint">"Enter the hospital's legal name"</span>
                            <input
                                class="usa-input"
                                id="hospital-name"
                                name="hospital-name"
                                type="text"
                                prop:value=move || fields.with(|f| f.hospital_location_name.clone())
                                on:input=move |ev| {
                                    edit(wizard, fields, |f| f.hospital_location_name = event_target_value(&ev))
                                }
                            />
                            <fieldset class="usa-fieldset usa-form-group">
                                <legend class="usa-legend">
                                    "Does your hospital have more than one location with distinct negotiated rates?"
                                </legend>
                                <div class="usa-radio">
                                    <input
                                        class="usa-radio__input"
                                        id="npi-yes"
                                        type="radio"
                                        name="show-npi"
                                        value="yes"
                                        prop:checked=move || fields.with(|f| f.include_npi == Some(true))
                                        on:change=move |_| edit(wizard, fields, |f| f.include_npi = Some(true))
                                    />
                                    <label class="usa-radio__label" for="npi-yes">"Yes"</label>
                                </div>
                                <div class="usa-radio">
                                    <input
                                        class="usa-radio__input"
                                        id="npi-no"
                                        type="radio"
                                        name="show-npi"
                                        value="no"
                                        prop:checked=move || fields.with(|f| f.include_npi == Some(false))
                                        on:change=move |_| edit(wizard, fields, |f| f.include_npi = Some(false))
                                    />
                                    <label class="usa-radio__label" for="npi-no">"No"</label>
                                </div>
                            </fieldset>
                            <div role="region" aria-live="polite">
                                <Show when=move || fields.with(|f| f.include_npi == Some(true)) fallback=|| view! {}>
                                    <div class="usa-form-group">
                                        <label class="usa-label" for="hospital-npi">"NPI (optional)"</label>
                                        <span class="usa-hint">"Enter the NPI for a hospital location"</span>
                                        <input
                                            class="usa-input"
                                            id="hospital-npi"
                                            name="hospital-npi"
                                            type="text"
                                            prop:value=move || fields.with(|f| f.npi.clone())
                                            on:input=move |ev| edit(wizard, fields, |f| f.npi = event_target_value(&ev))
                                        />
                                    </div>
                                </Show>
                            </div>
                            <fieldset class="usa-fieldset usa-form-group">
                                <legend class="usa-legend">"File type"</legend>
                                <FileTypeRadio format=FileFormat::Csv label="CSV" wizard=wizard fields=fields/>
                                <FileTypeRadio format=FileFormat::Json label="JSON" wizard=wizard fields=fields/>
                            </fieldset>
                        </form>
                        <button type="button" class="usa-button" on:click=on_copy>
                            "Copy to clipboard"
                        </button>
                        <pre
                            id="filename-wizard-output"
                            class="display-block bg-base-lighter padding-x-1 padding-y-105"
                        >
                            {filename}
                        </pre>
                        <div class="margin-bottom-2">
                            <AlertMessage alert=alert/>
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}

#[component]
fn FileTypeRadio(
    format: FileFormat,
    label: &'static str,
    wizard: Wizard,
    fields: RwSignal<FilenameFields>,
) -> impl IntoView {
    let id = format!("input-{}", format.extension());

    view! {
        <div class="usa-radio">
            <input
                class="usa-radio__input"
                id=id.clone()
                type="radio"
                name="input-type"
                value=format.extension()
                prop:checked=move || fields.with(|f| f.file_type == Some(format))
                on:change=move |_| edit(wizard, fields, |f| f.file_type = Some(format))
            />
            <label class="usa-radio__label" for=id>{label}</label>
        </div>
    }
}
