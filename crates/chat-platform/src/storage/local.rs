//! `window.localStorage` backend.
//! Persistent across page reloads; synchronous underneath, exposed through
//! the async port like every other backend.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Fails when there is no window or the browser denies access
    /// (e.g. storage disabled by privacy settings).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when full
        self.storage.set_item(key, value).map_err(js_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(js_error)?;
        let mut keys = Vec::new();
        for i in 0..len {
            if let Some(key) = self.storage.key(i).map_err(js_error)? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}

fn js_error(e: JsValue) -> ChatError {
    ChatError::Storage(format!("{:?}", e))
}
