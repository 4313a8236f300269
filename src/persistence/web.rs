//! LocalStorage backend for the browser build

use super::{STORAGE_KEY, StoreError, UnlockStore};

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

impl UnlockStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(STORAGE_KEY).map_err(js_error)
    }

    fn write(&mut self, json: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(STORAGE_KEY, json).map_err(js_error)?;
        log::info!("Unlock record saved");
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        Self::storage()?.remove_item(STORAGE_KEY).map_err(js_error)
    }
}
