use thiserror::Error;

use crate::crypto::{IV_LEN, SALT_LEN};

/// Result type alias for secured store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no password provided")]
    EmptyPassword,

    #[error("secured store already initialized; open it with the existing password")]
    AlreadyInitialized,

    #[error("secured store is not initialized")]
    NotInitialized,

    #[error("salt has wrong size: expected {expected} bytes, got {actual}")]
    SaltSize { expected: usize, actual: usize },

    #[error("OS random generator unavailable: {0}")]
    Random(getrandom::Error),

    #[error("ciphertext too short: {len} bytes, need at least {}", IV_LEN)]
    CiphertextTooShort { len: usize },

    /// Checksum mismatch after decryption. A wrong password and a tampered
    /// record look the same here.
    #[error("invalid password or corrupted data")]
    Integrity,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn salt_size(actual: usize) -> Self {
        Error::SaltSize {
            expected: SALT_LEN,
            actual,
        }
    }
}
