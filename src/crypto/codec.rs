//! Value encryption.
//!
//! Ciphertext record layout:
//! ```text
//! IV (16) | AES-256-CFB( PAD_LEN (1) | PADDING | PLAINTEXT | CRC32 (4) )
//! ```
//!
//! CFB decryption never fails on its own, so a wrong key only shows up as a
//! checksum mismatch once the frame is opened.

use aes::Aes256;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use zeroize::Zeroizing;

use super::{IV_LEN, KEY_LEN, header, secure_random};
use crate::error::{Error, Result};

type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// Encrypt plaintext into a ciphertext record
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let payload = header::seal(plaintext)?;

    let mut iv = [0u8; IV_LEN];
    secure_random(&mut iv)?;

    let mut record = Vec::with_capacity(IV_LEN + payload.len());
    record.extend_from_slice(&iv);
    record.extend_from_slice(&payload);

    Aes256CfbEnc::new(&(*key).into(), &iv.into()).encrypt(&mut record[IV_LEN..]);

    Ok(record)
}

/// Decrypt a ciphertext record
///
/// # Errors
///
/// Returns [`Error::CiphertextTooShort`] if the record cannot hold an IV and
/// [`Error::Integrity`] if the checksum does not match, which is what a wrong
/// password looks like.
pub fn decrypt(key: &[u8; KEY_LEN], record: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let (iv, body) = record
        .split_first_chunk::<IV_LEN>()
        .ok_or(Error::CiphertextTooShort { len: record.len() })?;

    let mut payload = Zeroizing::new(body.to_vec());
    Aes256CfbDec::new(&(*key).into(), &(*iv).into()).decrypt(payload.as_mut_slice());

    let plaintext = header::open(&payload)?;
    Ok(Zeroizing::new(plaintext.to_vec()))
}
