//! `sessionStorage` store.

use hpt_toolkit::error::StorageResult;
use hpt_toolkit::{KeyValueStore, StorageError};
use web_sys::Storage;

use super::js_error_message;

/// The tab's `sessionStorage`. Entries survive reloads, not new tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

impl SessionStore {
    fn storage() -> StorageResult<Storage> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .session_storage()
            .map_err(|e| StorageError::Unavailable(js_error_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage is disabled".into()))
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                message: js_error_message(&e),
            })
    }
}
