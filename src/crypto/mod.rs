//! Cryptographic primitives for the secured store.
//!
//! Provides key derivation, the padding/checksum frame, and value encryption.

pub mod codec;
pub mod header;
pub mod kdf;

use crate::error::{Error, Result};

pub use codec::{decrypt, encrypt};
pub use kdf::{DerivedKey, derive_new, derive_with_salt};

/// Length of the salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the encryption key (32 bytes / 256 bits, AES-256).
pub const KEY_LEN: usize = 32;
/// Length of the initialization vector (one AES block).
pub const IV_LEN: usize = 16;
/// Length of the CRC32 checksum trailer.
pub const CRC_LEN: usize = 4;
/// Smallest valid decrypted payload: the padding length byte plus the checksum.
pub const MIN_PAYLOAD_LEN: usize = 1 + CRC_LEN;
/// Smallest valid ciphertext record: empty plaintext with zero padding.
pub const MIN_RECORD_LEN: usize = IV_LEN + MIN_PAYLOAD_LEN;

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> Result<()> {
    getrandom::fill(buf).map_err(Error::Random)
}
