//! Footer component

use leptos::*;

use crate::config::{ABOUT_URL, RESOURCES_URL};

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="usa-footer usa-footer--slim">
            <div class="usa-footer__primary-section">
                <nav class="usa-footer__nav" aria-label="Footer navigation">
                    <ul class="grid-row grid-gap">
                        <li class="usa-footer__primary-content">
                            <a class="usa-footer__primary-link" href=ABOUT_URL>
                                "About Hospital Price Transparency"
                            </a>
                        </li>
                        <li class="usa-footer__primary-content">
                            <a class="usa-footer__primary-link" href=RESOURCES_URL>
                                "Resources"
                            </a>
                        </li>
                    </ul>
                </nav>
            </div>
            <div class="usa-footer__secondary-section">
                <p class="usa-footer__logo-heading">"Centers for Medicare and Medicaid Services"</p>
            </div>
        </footer>
    }
}
