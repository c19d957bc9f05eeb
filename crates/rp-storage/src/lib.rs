use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;

#[cfg(feature = "rocksdb")]
mod rocks;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksDbSessionStorage;

/// Text key/value store with the shape of browser local storage.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Reads a JSON record stored under `key`.
pub fn load_json<T: DeserializeOwned>(storage: &impl SessionStorage, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(raw) => {
            let record = serde_json::from_str(&raw).with_context(|| format!("malformed record under {key}"))?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(storage: &impl SessionStorage, key: &str, record: &T) -> Result<()> {
    let raw = serde_json::to_string(record)?;
    storage.set(key, &raw)
}

#[derive(Default)]
pub struct NoopSessionStorage;

impl SessionStorage for NoopSessionStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        network: String,
    }

    #[test]
    fn in_memory_round_trip_and_remove() {
        let storage = InMemorySessionStorage::default();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn json_helpers_report_malformed_records() {
        let storage = InMemorySessionStorage::with_entry("bad", "{not json");
        assert!(load_json::<Record>(&storage, "bad").is_err());

        save_json(&storage, "good", &Record { network: "testnet".into() }).unwrap();
        let loaded: Option<Record> = load_json(&storage, "good").unwrap();
        assert_eq!(loaded, Some(Record { network: "testnet".into() }));
    }

    #[test]
    fn noop_never_stores() {
        let storage = NoopSessionStorage;
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
