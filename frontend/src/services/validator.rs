//! `@cmsgov/hpt-validator` binding.
//!
//! The package validates a browser `File` directly, so [`JsValidator`] uses
//! `web_sys::File` as its source.

use hpt_toolkit::error::ValidatorResult;
use hpt_toolkit::{MrfValidator, ValidationOptions, ValidatorError, ValidatorOutput};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use super::js_error_message;

/// Options object as the JS package expects it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsOptions {
    max_errors: usize,
}

/// Validator backed by the JS package.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsValidator;

impl JsValidator {
    fn options(options: &ValidationOptions) -> ValidatorResult<JsValue> {
        serde_wasm_bindgen::to_value(&JsOptions {
            max_errors: options.max_findings,
        })
        .map_err(|e| ValidatorError::Collaborator(format!("Failed to pass options: {}", e)))
    }

    async fn resolve(promise: js_sys::Promise) -> ValidatorResult<ValidatorOutput> {
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| ValidatorError::Unreadable(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value(value)
            .map_err(|e| ValidatorError::Collaborator(format!("Unexpected validator result: {}", e)))
    }
}

impl MrfValidator for JsValidator {
    type Source = File;

    async fn validate_csv(
        &self,
        source: &File,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput> {
        let options = Self::options(options)?;
        Self::resolve(validate_csv_js(source, schema_version, &options)).await
    }

    async fn validate_json(
        &self,
        source: &File,
        schema_version: &str,
        options: &ValidationOptions,
    ) -> ValidatorResult<ValidatorOutput> {
        let options = Self::options(options)?;
        Self::resolve(validate_json_js(source, schema_version, &options)).await
    }

    fn validate_filename(&self, name: &str) -> bool {
        validate_filename_js(name)
    }
}

/// JavaScript functions from validator.js
#[wasm_bindgen(module = "/src/js/validator.js")]
extern "C" {
    #[wasm_bindgen(js_name = "validateCsvFile")]
    fn validate_csv_js(file: &File, schema_version: &str, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "validateJsonFile")]
    fn validate_json_js(file: &File, schema_version: &str, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "validateFilename")]
    fn validate_filename_js(name: &str) -> bool;
}
