// ## src/crypto/aead.rs

//! crypto/aead.rs
//! AES-128-GCM record sealing for the "aesgcm" content encoding.
//!
//! Design notes:
//! - One record per message; no associated data.
//! - A record is u16be(pad_len) || pad_len zero bytes || plaintext. We always
//!   send pad_len = 0, but the opener accepts any well-formed padding.
//! - Tag verification must fail closed (no partial plaintext).

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Nonce};
use byteorder::{BigEndian, ByteOrder};

use crate::crypto::types::{EncryptionError, CEK_LEN_16, NONCE_LEN_12, PAD_PREFIX_LEN, TAG_LEN};

/// Prefix the plaintext with a zero padding-length field and seal it.
pub fn seal_record(
    cek: &[u8; CEK_LEN_16],
    nonce: &[u8; NONCE_LEN_12],
    plaintext: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    let mut record = vec![0u8; PAD_PREFIX_LEN + plaintext.len()];
    BigEndian::write_u16(&mut record[..PAD_PREFIX_LEN], 0);
    record[PAD_PREFIX_LEN..].copy_from_slice(plaintext);

    let cipher = Aes128Gcm::new_from_slice(cek)
        .map_err(|_| EncryptionError::Failure("invalid AES-128-GCM key length".into()))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), Payload { msg: &record, aad: &[] })
        .map_err(|_| EncryptionError::Failure("AES-GCM seal failed".into()))
}

/// Open a sealed record and strip its padding.
pub fn open_record(
    cek: &[u8; CEK_LEN_16],
    nonce: &[u8; NONCE_LEN_12],
    ciphertext_and_tag: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    if ciphertext_and_tag.len() < TAG_LEN + PAD_PREFIX_LEN {
        return Err(EncryptionError::CiphertextTooShort { len: ciphertext_and_tag.len() });
    }

    let cipher = Aes128Gcm::new_from_slice(cek)
        .map_err(|_| EncryptionError::Failure("invalid AES-128-GCM key length".into()))?;

    let record = cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext_and_tag, aad: &[] })
        .map_err(|_| EncryptionError::TagMismatch)?;

    let pad_len = BigEndian::read_u16(&record[..PAD_PREFIX_LEN]) as usize;
    let body_start = PAD_PREFIX_LEN + pad_len;
    if body_start > record.len() {
        return Err(EncryptionError::InvalidPadding);
    }
    if record[PAD_PREFIX_LEN..body_start].iter().any(|&b| b != 0) {
        return Err(EncryptionError::InvalidPadding);
    }

    Ok(record[body_start..].to_vec())
}
