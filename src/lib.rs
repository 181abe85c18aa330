//! Password-based encryption in front of any key-value store.
//!
//! Values are encrypted before they reach the backend and decrypted on the
//! way back. Keys are stored as given, in the clear.
//!
//! ```no_run
//! use sealkv::{MemoryStorage, SecuredStore};
//! use zeroize::Zeroizing;
//!
//! # fn main() -> sealkv::Result<()> {
//! let store = SecuredStore::create(Zeroizing::new("password".into()), MemoryStorage::new())?;
//! store.put(b"key", b"value")?;
//! assert_eq!(store.get(b"key")?.as_deref().map(Vec::as_slice), Some(&b"value"[..]));
//! store.delete(b"key")?;
//! # Ok(())
//! # }
//! ```
//!
//! Known limitations: the key is one SHA-256 pass over password and salt with
//! no stretching, and integrity rests on an encrypted CRC32 rather than a MAC.

pub mod crypto;
mod error;
pub mod storage;

use anyhow::Context;
use directories::ProjectDirs;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::crypto::DerivedKey;
pub use crate::error::{Error, Result};
pub use crate::storage::{FileStorage, KvStore, MemoryStorage};

/// Backend key holding the salt unless another one is supplied.
pub const DEFAULT_SALT_KEY: &[u8] = b"_salt_key_74469_";

/// Encrypting wrapper around a [`KvStore`].
///
/// The salt key it was built with is reserved: writing application data
/// under it through any handle corrupts the store. That is a caller
/// precondition and is not checked.
pub struct SecuredStore<S: KvStore> {
    storage: S,
    key: DerivedKey,
    salt_key: Vec<u8>,
}

impl<S: KvStore> SecuredStore<S> {
    /// Initializes a new secured store on `storage` under [`DEFAULT_SALT_KEY`].
    pub fn create(password: Zeroizing<String>, storage: S) -> Result<Self> {
        Self::create_with_salt_key(password, storage, DEFAULT_SALT_KEY)
    }

    /// Initializes a new secured store, generating and persisting a fresh salt.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AlreadyInitialized`] if a salt is already present,
    /// since replacing it would orphan every value encrypted under the old key.
    pub fn create_with_salt_key(
        password: Zeroizing<String>,
        storage: S,
        salt_key: &[u8],
    ) -> Result<Self> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        if storage.get(salt_key)?.is_some() {
            return Err(Error::AlreadyInitialized);
        }

        let (key, salt) = crypto::derive_new(&password)?;
        drop(password);

        storage.put(salt_key, &salt)?;
        debug!(salt_key_len = salt_key.len(), "initialized secured store");

        Ok(Self {
            storage,
            key,
            salt_key: salt_key.to_vec(),
        })
    }

    /// Opens an existing secured store on `storage` under [`DEFAULT_SALT_KEY`].
    pub fn open(password: Zeroizing<String>, storage: S) -> Result<Self> {
        Self::open_with_salt_key(password, storage, DEFAULT_SALT_KEY)
    }

    /// Opens an existing secured store by re-deriving the key from its salt.
    ///
    /// The password is not verified here. A wrong password surfaces as
    /// [`Error::Integrity`] on the first [`get`](Self::get) of an existing value.
    pub fn open_with_salt_key(
        password: Zeroizing<String>,
        storage: S,
        salt_key: &[u8],
    ) -> Result<Self> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        let salt = storage.get(salt_key)?.ok_or(Error::NotInitialized)?;

        let key = crypto::derive_with_salt(&password, &salt)?;
        drop(password);
        debug!(salt_key_len = salt_key.len(), "opened secured store");

        Ok(Self {
            storage,
            key,
            salt_key: salt_key.to_vec(),
        })
    }

    /// Encrypts `value` and stores it under `key`, replacing any previous value.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let record = crypto::encrypt(self.key.as_bytes(), value)?;
        trace!(plaintext_len = value.len(), record_len = record.len(), "put");
        self.storage.put(key, &record)?;
        Ok(())
    }

    /// Returns the decrypted value under `key`, or `None` if there is none.
    pub fn get(&self, key: &[u8]) -> Result<Option<Zeroizing<Vec<u8>>>> {
        let Some(record) = self.storage.get(key)? else {
            trace!("get: no value");
            return Ok(None);
        };

        match crypto::decrypt(self.key.as_bytes(), &record) {
            Ok(plaintext) => {
                trace!(record_len = record.len(), "get");
                Ok(Some(plaintext))
            }
            Err(e) => {
                debug!(record_len = record.len(), error = %e, "record failed to decrypt");
                Err(e)
            }
        }
    }

    /// Removes `key`. Succeeds for missing keys and never checks the password.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        trace!("delete");
        self.storage.delete(key)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn salt_key(&self) -> &[u8] {
        &self.salt_key
    }
}

pub fn default_storage() -> anyhow::Result<FileStorage> {
    let project_dirs =
        ProjectDirs::from("", "", "sealkv").context("could not determine platform directories")?;

    let path = project_dirs.data_dir().join("sealkv.json");

    Ok(FileStorage::new(path))
}
