//! Storage backends the secured store writes through.
//!
//! The secured store only ever talks to [`KvStore`]. Keys and values are
//! opaque bytes to a backend; the salt entry is an ordinary key as far as the
//! backend is concerned.

use std::sync::Arc;

use anyhow::Result;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A byte-oriented key-value store.
///
/// Implementations decide their own atomicity and ordering guarantees; the
/// secured store assumes none.
pub trait KvStore: Send + Sync {
    /// Saves `value` under `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, key: &[u8]) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}
