use hpt_toolkit::{Alert, AlertKind};
use leptos::*;

/// Slim USWDS alert.
#[component]
pub fn AlertBox(#[prop(into)] kind: MaybeSignal<AlertKind>, children: Children) -> impl IntoView {
    view! {
        <div
            class=move || format!("usa-alert usa-alert--slim {}", kind.get().css_class())
            aria-live="polite"
            aria-atomic="true"
        >
            <div class="usa-alert__body">
                <p class="usa-alert__text">{children()}</p>
            </div>
        </div>
    }
}

/// An [`Alert`] that follows a signal.
#[component]
pub fn AlertMessage(#[prop(into)] alert: Signal<Alert>) -> impl IntoView {
    view! {
        <AlertBox kind=Signal::derive(move || alert.get().kind)>
            {move || alert.get().message}
        </AlertBox>
    }
}
