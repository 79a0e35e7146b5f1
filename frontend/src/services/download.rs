//! Object URLs for downloadable artifacts.

use hpt_toolkit::error::ArtifactResult;
use hpt_toolkit::{Artifact, ArtifactError, ObjectUrlFactory};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

use super::js_error_message;

/// Wraps artifact contents in a `Blob` and hands out `blob:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobUrlFactory;

impl ObjectUrlFactory for BlobUrlFactory {
    fn create(&self, artifact: &Artifact) -> ArtifactResult<String> {
        let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.contents));
        let properties = BlobPropertyBag::new();
        properties.set_type(&artifact.mime_type);

        let blob = Blob::new_with_str_sequence_and_options(&parts, &properties)
            .map_err(|e| ArtifactError::CreateUrl(js_error_message(&e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| ArtifactError::CreateUrl(js_error_message(&e)))?;

        log::debug!("Created download URL for {}", artifact.file_name);
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {}", url, js_error_message(&e));
        }
    }
}
