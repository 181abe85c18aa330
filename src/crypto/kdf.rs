//! Password key derivation.
//!
//! The key is a single SHA-256 pass over `password || salt`. There is no
//! stretching, so a weak password is cheap to brute force offline once the
//! salt and a record are known. Changing the construction would invalidate
//! every existing salt, so it stays as is.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::{KEY_LEN, SALT_LEN, secure_random};
use crate::error::{Error, Result};

/// A 256-bit symmetric key derived from a password and salt.
///
/// Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Generate a fresh salt and derive a key from it.
pub fn derive_new(password: &str) -> Result<(DerivedKey, [u8; SALT_LEN])> {
    let mut salt = [0u8; SALT_LEN];
    secure_random(&mut salt)?;
    let key = hash(password, &salt);
    Ok((key, salt))
}

/// Re-derive the key for a previously persisted salt.
///
/// # Errors
///
/// Returns [`Error::SaltSize`] unless `salt` is exactly [`SALT_LEN`] bytes.
pub fn derive_with_salt(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(Error::salt_size(salt.len()));
    }
    Ok(hash(password, salt))
}

fn hash(password: &str, salt: &[u8]) -> DerivedKey {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    DerivedKey(hasher.finalize().into())
}
