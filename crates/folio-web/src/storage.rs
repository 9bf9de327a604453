#![forbid(unsafe_code)]

//! `localStorage` preference backend.

use folio_runtime::{StorageBackend, StorageError, StorageResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Window `localStorage`. Private browsing modes may refuse access, in which
/// case [`LocalStorage::open`] fails and the host falls back to memory.
pub(crate) struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub(crate) fn open() -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is absent".into())),
            Err(err) => Err(StorageError::Unavailable(js_error(&err))),
        }
    }
}

impl StorageBackend for LocalStorage {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Backend(js_error(&err)))
    }

    fn store(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(js_error(&err)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| StorageError::Backend(js_error(&err)))
    }
}
