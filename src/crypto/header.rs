//! Padding header and checksum frame wrapped around every plaintext before
//! encryption.
//!
//! ```text
//! PAD_LEN (1) | PADDING (PAD_LEN) | PLAINTEXT | CRC32 (4, big-endian)
//! ```
//!
//! The CRC covers everything before it. It is not a MAC: it only catches
//! decryption under the wrong key and accidental damage, with a 2^-32 chance
//! of accepting garbage.

use zeroize::Zeroizing;

use super::{CRC_LEN, MIN_PAYLOAD_LEN, secure_random};
use crate::error::{Error, Result};

/// Upper bound of the random padding, set by the one-byte length field.
pub const MAX_PADDING: usize = u8::MAX as usize;

/// Frame `plaintext` with a random-length random padding header and a
/// trailing checksum.
pub fn seal(plaintext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut pad_len = [0u8; 1];
    secure_random(&mut pad_len)?;

    let mut padding = vec![0u8; usize::from(pad_len[0])];
    secure_random(&mut padding)?;

    Ok(frame(&padding, plaintext))
}

/// Validate the checksum and strip the padding header.
///
/// Every failure maps to [`Error::Integrity`]: a short payload, a checksum
/// mismatch, or a padding length running past the checksummed bytes.
pub fn open(payload: &[u8]) -> Result<&[u8]> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(Error::Integrity);
    }

    let (body, claimed) = payload.split_at(payload.len() - CRC_LEN);
    if claimed != checksum(body) {
        return Err(Error::Integrity);
    }

    let pad_len = usize::from(body[0]);
    body.get(1 + pad_len..).ok_or(Error::Integrity)
}

fn frame(padding: &[u8], plaintext: &[u8]) -> Zeroizing<Vec<u8>> {
    debug_assert!(padding.len() <= MAX_PADDING);

    // sized up front so the buffer never reallocates and leaves copies behind
    let mut payload = Zeroizing::new(Vec::with_capacity(
        1 + padding.len() + plaintext.len() + CRC_LEN,
    ));
    payload.push(padding.len() as u8);
    payload.extend_from_slice(padding);
    payload.extend_from_slice(plaintext);

    let crc = checksum(&payload);
    payload.extend_from_slice(&crc);
    payload
}

fn checksum(data: &[u8]) -> [u8; CRC_LEN] {
    crc32fast::hash(data).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_layout() {
        let payload = frame(&[9, 9, 9], b"test-data");

        assert_eq!(payload[0], 3);
        assert_eq!(&payload[1..4], &[9, 9, 9]);
        assert_eq!(&payload[4..13], b"test-data");
        assert_eq!(payload.len(), 1 + 3 + 9 + CRC_LEN);

        let crc = crc32fast::hash(&payload[..13]);
        assert_eq!(&payload[13..], &crc.to_be_bytes());
    }

    #[test]
    fn seal_then_open_returns_plaintext() {
        let payload = seal(b"test-data").unwrap();
        assert_eq!(open(&payload).unwrap(), b"test-data");
    }

    #[test]
    fn seal_pads_within_bounds() {
        for _ in 0..32 {
            let payload = seal(b"abc").unwrap();
            let pad_len = usize::from(payload[0]);
            assert_eq!(payload.len(), 1 + pad_len + 3 + CRC_LEN);
        }
    }

    #[test]
    fn empty_plaintext_without_padding_is_minimal() {
        let payload = frame(&[], b"");
        assert_eq!(payload.len(), MIN_PAYLOAD_LEN);
        assert_eq!(open(&payload).unwrap(), b"");
    }

    #[test]
    fn maximum_padding_roundtrips() {
        let padding = [0xAB; MAX_PADDING];
        let payload = frame(&padding, b"value");
        assert_eq!(open(&payload).unwrap(), b"value");
    }

    #[test]
    fn open_rejects_unframed_data() {
        assert!(matches!(open(b"test-data"), Err(Error::Integrity)));
    }

    #[test]
    fn open_rejects_short_payload() {
        for len in 0..MIN_PAYLOAD_LEN {
            let data = vec![0u8; len];
            assert!(matches!(open(&data), Err(Error::Integrity)));
        }
    }

    #[test]
    fn open_rejects_checksum_mismatch() {
        let mut payload = frame(&[1, 2], b"value");
        let last = payload.len() - 1;
        payload[last] ^= 0x01;
        assert!(matches!(open(&payload), Err(Error::Integrity)));
    }

    #[test]
    fn open_rejects_padding_overrun_with_valid_checksum() {
        let mut body = vec![200u8, 1, 2, 3];
        let crc = checksum(&body);
        body.extend_from_slice(&crc);

        assert!(matches!(open(&body), Err(Error::Integrity)));
    }
}
