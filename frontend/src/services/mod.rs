//! Browser services.
//!
//! Implementations of the toolkit's platform ports:
//!
//! # Services
//!
//! - [`validator`] - `@cmsgov/hpt-validator` behind [`hpt_toolkit::MrfValidator`]
//! - [`storage`] - `sessionStorage` behind [`hpt_toolkit::KeyValueStore`]
//! - [`download`] - `Blob` object URLs behind [`hpt_toolkit::ObjectUrlFactory`]
//! - [`clipboard`] - Copy buttons
//!
//! # JavaScript Bindings
//!
//! The validator binding lives in `src/js/validator.js`.

pub mod clipboard;
pub mod download;
pub mod storage;
pub mod validator;

pub use clipboard::*;
pub use download::*;
pub use storage::*;
pub use validator::*;

use wasm_bindgen::JsValue;

/// Best-effort message of a thrown JS value.
pub(crate) fn js_error_message(e: &JsValue) -> String {
    js_sys::Reflect::get(e, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| e.as_string())
        .unwrap_or_else(|| "Unknown JS error".to_string())
}
