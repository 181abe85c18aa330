use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{Result, anyhow};

use super::KvStore;

/// A [`KvStore`] backed by a `HashMap`. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("memory storage lock poisoned")
}

impl KvStore for MemoryStorage {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.entries.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}
