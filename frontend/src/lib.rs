//! HPT Tools - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for the Hospital Price Transparency tools: the
//! online MRF validator, the MRF naming wizard and the `cms-hpt.txt`
//! generator. All state lives in the browser tab.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation)                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /                  HomePage                             │
//! │  ├── /online-validator  ValidatorPage + ValidationResults    │
//! │  ├── /filename-wizard   WizardPage                           │
//! │  └── /txt-generator     TxtGeneratorPage                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Frontend constants
//! - [`components`] - UI components (Header, FileInput, ValidationResults, etc.)
//! - [`pages`] - One component per route
//! - [`services`] - Browser implementations of the toolkit ports

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod pages;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use components::*;
pub use pages::*;
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and logger, then mount [`App`].
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 HPT Tools - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Hospital Price Transparency Tools"/>
        <Router>
            <Header/>
            <main id="main-content">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/online-validator" view=ValidatorPage/>
                    <Route path="/filename-wizard" view=WizardPage/>
                    <Route path="/txt-generator" view=TxtGeneratorPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
