//! LocalStorage-backed store (wasm32 only)

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::{Result, TrackerError};
use crate::persistence::KeyValueStore;

fn js_err(op: &str, key: &str, e: JsValue) -> TrackerError {
    TrackerError::Storage(format!("{} '{}' failed: {:?}", op, key, e))
}

/// The origin's `window.localStorage`
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Open LocalStorage. `None` when storage is unavailable (e.g. disabled by
    /// the browser).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_err("get", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_err("set", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_err("remove", key, e))
    }

    fn keys(&self) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(|e| js_err("length", "*", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Ok(Some(key)) = self.storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
