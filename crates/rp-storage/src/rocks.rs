use crate::SessionStorage;
use anyhow::{Context, Result};
use rocksdb::{DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Session storage persisted in a RocksDB directory, for native tools.
pub struct RocksDbSessionStorage {
    db: Arc<DB>,
}

impl RocksDbSessionStorage {
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path).with_context(|| format!("failed to open session store at {}", path.display()))?;
        Ok(Self { db: Arc::new(db) })
    }

    fn key_for(key: &str) -> String {
        format!("session:{key}")
    }
}

impl SessionStorage for RocksDbSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.db.get(Self::key_for(key).as_bytes())?;
        match value {
            Some(raw) => Ok(Some(String::from_utf8(raw).context("session value is not UTF-8")?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.put(Self::key_for(key).as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db.delete(Self::key_for(key).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = RocksDbSessionStorage::open_default(dir.path()).unwrap();
            storage.set("ripplet-wallet", r#"{"network":"devnet"}"#).unwrap();
        }
        let storage = RocksDbSessionStorage::open_default(dir.path()).unwrap();
        assert_eq!(
            storage.get("ripplet-wallet").unwrap().as_deref(),
            Some(r#"{"network":"devnet"}"#)
        );

        storage.remove("ripplet-wallet").unwrap();
        assert_eq!(storage.get("ripplet-wallet").unwrap(), None);
    }
}
