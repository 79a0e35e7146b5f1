//! USWDS file input with accepted-type enforcement.
//!
//! The native `<input type="file">` covers the drop target, so dropping a
//! file raises the same change event as picking one.

use hpt_toolkit::{CandidateFile, ChangeOutcome, FileInputState};
use leptos::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

/// Name and MIME type of every file the input currently holds.
fn candidates(input: &HtmlInputElement) -> (Vec<CandidateFile>, Option<File>) {
    let Some(list) = input.files() else {
        return (Vec::new(), None);
    };

    let files: Vec<File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
    let candidates = files
        .iter()
        .map(|f| CandidateFile::new(f.name(), f.type_()))
        .collect();

    (candidates, files.into_iter().next())
}

#[component]
pub fn FileInput(
    #[prop(into)] id: String,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] accept: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    /// Receives the first accepted file, or `None` for an emptied selection
    #[prop(optional, into)]
    on_change: Option<Callback<Option<File>>>,
    #[prop(optional, into)] on_drop: Option<Callback<DragEvent>>,
) -> impl IntoView {
    let state = create_rw_signal(FileInputState::new(accept.as_deref()));

    let handle_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let (picked, first) = candidates(&input);

        let mut outcome = ChangeOutcome::Rejected;
        state.update(|s| outcome = s.on_change(&picked));

        match outcome {
            ChangeOutcome::Accepted(_) => {
                if let Some(callback) = on_change {
                    callback.call(first);
                }
            }
            ChangeOutcome::Rejected => {
                ev.prevent_default();
                ev.stop_propagation();
            }
        }

        // Lets the same file trigger another change
        input.set_value("");
    };

    let handle_drop = move |ev: DragEvent| {
        state.update(|s| s.dropped());
        if let Some(callback) = on_drop {
            callback.call(ev);
        }
    };

    let has_file = move || state.with(|s| s.selected_file.is_some());
    let wrapper_class = move || {
        if disabled.get() {
            "usa-file-input usa-file-input--disabled"
        } else {
            "usa-file-input"
        }
    };
    let instructions_class = move || {
        if has_file() {
            "usa-file-input__instructions display-none"
        } else {
            "usa-file-input__instructions"
        }
    };

    view! {
        <div class=wrapper_class aria-disabled=move || disabled.get().to_string()>
            <div
                class=move || state.with(|s| s.target_class())
                on:dragover=move |_| state.update(|s| s.drag_over())
                on:dragleave=move |_| state.update(|s| s.drag_leave())
                on:drop=handle_drop
            >
                <Show when=has_file fallback=|| view! {}>
                    <div class="usa-file-input__preview-heading">
                        "Selected file"
                        <span class="usa-file-input__choose">"Change file"</span>
                    </div>
                </Show>
                <div class=instructions_class aria-hidden="true">
                    <span class="usa-file-input__drag-text">"Drag file here or "</span>
                    <span class="usa-file-input__choose">"choose from folder"</span>
                </div>
                <Show when=has_file fallback=|| view! {}>
                    <div class="usa-file-input__preview" aria-hidden="true">
                        {move || state.with(|s| s.selected_file.as_ref().map(|f| f.name.clone()))}
                    </div>
                </Show>
                <div class="usa-file-input__box"></div>
                <Show when=move || state.with(|s| s.show_type_error) fallback=|| view! {}>
                    <div class="usa-file-input__accepted-files-message">
                        "This is not a valid file type."
                    </div>
                </Show>
                <input
                    type="file"
                    id=id.clone()
                    name=name.clone()
                    class="usa-file-input__input"
                    accept=accept.clone()
                    disabled=move || disabled.get()
                    on:change=handle_change
                />
            </div>
        </div>
    }
}
