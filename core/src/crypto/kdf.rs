// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! HKDF-SHA-256 key schedule for the "aesgcm" content encoding.
//!
//! Design:
//! - HKDF(salt = auth secret, IKM = ECDH secret, info = auth label) -> PRK (32 bytes)
//! - HKDF(salt = message salt, IKM = PRK, info = key label || context) -> CEK (16 bytes)
//! - HKDF(salt = message salt, IKM = PRK, info = nonce label || context) -> nonce (12 bytes)
//!
//! The context binds both public keys, receiver first:
//! "P-256" 0x00 || u16be(65) || receiver key || u16be(65) || sender key.
//! Sender and receiver must build it in the same order or the derived keys differ.

use byteorder::{BigEndian, ByteOrder};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::labels::{AUTH_INFO, CONTEXT_CURVE, KEY_INFO, NONCE_INFO};
use crate::constants::{AUTH_SECRET_LEN, PUBLIC_KEY_LEN, SALT_LEN, SHARED_SECRET_LEN};
use crate::crypto::types::{EncryptionError, CEK_LEN_16, NONCE_LEN_12};

/// Total context length: curve label, then two length-prefixed keys.
pub const CONTEXT_LEN: usize = CONTEXT_CURVE.len() + 2 * (2 + PUBLIC_KEY_LEN);

#[inline]
fn hkdf_sha256(salt: &[u8], ikm: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), EncryptionError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    hk.expand(info, okm)
        .map_err(|_| EncryptionError::Failure("HKDF expand failed (SHA-256)".into()))
}

/// Summary: Derive the 32-byte pseudo-random key from the auth secret and the
/// ECDH shared secret.
#[inline]
pub fn derive_prk(
    auth_secret: &[u8; AUTH_SECRET_LEN],
    shared_secret: &[u8],
) -> Result<Zeroizing<[u8; SHARED_SECRET_LEN]>, EncryptionError> {
    let mut prk = Zeroizing::new([0u8; SHARED_SECRET_LEN]);
    hkdf_sha256(auth_secret, shared_secret, AUTH_INFO, &mut prk[..])?;
    Ok(prk)
}

/// Summary: Build the per-message context from the receiver's (subscriber's)
/// and the sender's (server's) uncompressed public keys.
pub fn build_context(
    receiver_public: &[u8; PUBLIC_KEY_LEN],
    sender_public: &[u8; PUBLIC_KEY_LEN],
) -> [u8; CONTEXT_LEN] {
    let mut out = [0u8; CONTEXT_LEN];
    let mut i = 0usize;

    fn put_key(out: &mut [u8], i: &mut usize, key: &[u8; PUBLIC_KEY_LEN]) {
        BigEndian::write_u16(&mut out[*i..*i + 2], PUBLIC_KEY_LEN as u16);
        *i += 2;
        out[*i..*i + PUBLIC_KEY_LEN].copy_from_slice(key);
        *i += PUBLIC_KEY_LEN;
    }

    out[..CONTEXT_CURVE.len()].copy_from_slice(CONTEXT_CURVE);
    i += CONTEXT_CURVE.len();
    put_key(&mut out, &mut i, receiver_public);
    put_key(&mut out, &mut i, sender_public);

    debug_assert_eq!(i, CONTEXT_LEN, "context wrote incorrect length");
    out
}

#[inline]
fn info_with_context(label: &[u8], context: &[u8; CONTEXT_LEN]) -> Vec<u8> {
    let mut info = Vec::with_capacity(label.len() + CONTEXT_LEN);
    info.extend_from_slice(label);
    info.extend_from_slice(context);
    info
}

/// Summary: Derive the 16-byte content-encryption key and the 12-byte nonce.
///
/// Both expansions share salt and PRK and differ only in their label.
pub fn derive_content_key_and_nonce(
    salt: &[u8; SALT_LEN],
    prk: &[u8; SHARED_SECRET_LEN],
    context: &[u8; CONTEXT_LEN],
) -> Result<(Zeroizing<[u8; CEK_LEN_16]>, [u8; NONCE_LEN_12]), EncryptionError> {
    let mut cek = Zeroizing::new([0u8; CEK_LEN_16]);
    hkdf_sha256(salt, prk, &info_with_context(KEY_INFO, context), &mut cek[..])?;

    let mut nonce = [0u8; NONCE_LEN_12];
    hkdf_sha256(salt, prk, &info_with_context(NONCE_INFO, context), &mut nonce)?;

    Ok((cek, nonce))
}
