//! Browser local storage behind the `SessionStorage` seam.

use anyhow::{Result, anyhow};
use gloo_storage::{LocalStorage, Storage};
use rp_storage::SessionStorage;
use wasm_bindgen::JsValue;

/// Raw string access to `window.localStorage`.
///
/// `gloo-storage`'s typed helpers JSON-encode values; the store writes its
/// own JSON, so this goes through the raw handle instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSessionStorage;

fn js_err(op: &str, key: &str, err: JsValue) -> anyhow::Error {
    anyhow!("localStorage {op} {key}: {err:?}")
}

impl SessionStorage for LocalSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(|err| js_err("get", key, err))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| js_err("set", key, err))
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}
