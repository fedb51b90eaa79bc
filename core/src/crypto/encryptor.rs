// ## src/crypto/encryptor.rs

//! crypto/encryptor.rs
//! Payload encryption for a single push message ("aesgcm" encoding).
//!
//! Flow:
//! 1. Decode subscriber key (65 bytes) and auth secret (16 bytes).
//! 2. Fresh ephemeral server key pair, ECDH against the subscriber key.
//! 3. Fresh random 16-byte salt.
//! 4. PRK, then CEK + nonce bound to both public keys (see `kdf`).
//! 5. Seal u16be(0) || plaintext under AES-128-GCM.
//!
//! Security notes:
//! - The server key and salt are generated per call and dropped afterwards.
//!   Nothing here caches them; reusing either across messages breaks the scheme.
//! - Randomness is a parameter (`encrypt_with_rng`) so tests can pin it.

use p256::ecdh::diffie_hellman;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::constants::{AUTH_SECRET_LEN, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN, SALT_LEN};
use crate::crypto::aead::{open_record, seal_record};
use crate::crypto::kdf::{build_context, derive_content_key_and_nonce, derive_prk};
use crate::crypto::types::{EncryptionError, EncryptionResult, KeyKind};
use crate::utils::b64url_decode;

/// Decode base64url key material into a fixed-size array.
pub fn decode_key<const N: usize>(text: &str, key: KeyKind) -> Result<[u8; N], EncryptionError> {
    let bytes = Zeroizing::new(
        b64url_decode(text).map_err(|_| EncryptionError::InvalidEncoding { key })?,
    );
    if bytes.len() != N {
        return Err(EncryptionError::InvalidKeyLen { key, expected: N, actual: bytes.len() });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Uncompressed SEC1 encoding of a public key.
pub fn uncompressed_point(public: &PublicKey) -> Result<[u8; PUBLIC_KEY_LEN], EncryptionError> {
    let point = public.to_encoded_point(false);
    point
        .as_bytes()
        .try_into()
        .map_err(|_| EncryptionError::Failure("unexpected encoded point length".into()))
}

fn parse_public_key(raw: &[u8; PUBLIC_KEY_LEN], key: KeyKind) -> Result<PublicKey, EncryptionError> {
    PublicKey::from_sec1_bytes(raw).map_err(|_| EncryptionError::InvalidPoint { key })
}

/// Encrypt `plaintext` for a subscriber using the operating system RNG.
pub fn encrypt(
    client_public_key_b64: &str,
    auth_secret_b64: &str,
    plaintext: &[u8],
) -> Result<EncryptionResult, EncryptionError> {
    encrypt_with_rng(client_public_key_b64, auth_secret_b64, plaintext, &mut OsRng)
}

/// Encrypt `plaintext` for a subscriber, drawing the ephemeral key and salt
/// from `rng`.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    client_public_key_b64: &str,
    auth_secret_b64: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<EncryptionResult, EncryptionError> {
    let client_public: [u8; PUBLIC_KEY_LEN] =
        decode_key(client_public_key_b64, KeyKind::ClientPublicKey)?;
    let auth_secret: Zeroizing<[u8; AUTH_SECRET_LEN]> =
        Zeroizing::new(decode_key(auth_secret_b64, KeyKind::AuthSecret)?);
    let client_point = parse_public_key(&client_public, KeyKind::ClientPublicKey)?;

    // Ephemeral server key; SecretKey wipes itself on drop.
    let server_secret = SecretKey::random(&mut *rng);
    let server_public = uncompressed_point(&server_secret.public_key())?;

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let shared = diffie_hellman(server_secret.to_nonzero_scalar(), client_point.as_affine());
    let prk = derive_prk(&auth_secret, shared.raw_secret_bytes().as_slice())?;

    let context = build_context(&client_public, &server_public);
    let (cek, nonce) = derive_content_key_and_nonce(&salt, &prk, &context)?;
    let ciphertext = seal_record(&cek, &nonce, plaintext)?;

    Ok(EncryptionResult { server_public_key: server_public, salt, ciphertext })
}

/// Receiver-side decryption: re-derive CEK and nonce from the subscriber's
/// private key, auth secret, and the sender's public key and salt.
pub fn decrypt(
    receiver_private_key: &[u8; PRIVATE_KEY_LEN],
    auth_secret: &[u8; AUTH_SECRET_LEN],
    server_public_key: &[u8; PUBLIC_KEY_LEN],
    salt: &[u8; SALT_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    let receiver_secret = SecretKey::from_slice(receiver_private_key)
        .map_err(|_| EncryptionError::InvalidPoint { key: KeyKind::ReceiverPrivateKey })?;
    let receiver_public = uncompressed_point(&receiver_secret.public_key())?;
    let sender_point = parse_public_key(server_public_key, KeyKind::ServerPublicKey)?;

    let shared = diffie_hellman(receiver_secret.to_nonzero_scalar(), sender_point.as_affine());
    let prk = derive_prk(auth_secret, shared.raw_secret_bytes().as_slice())?;

    let context = build_context(&receiver_public, server_public_key);
    let (cek, nonce) = derive_content_key_and_nonce(salt, &prk, &context)?;
    open_record(&cek, &nonce, ciphertext)
}
