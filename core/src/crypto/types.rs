// ## src/crypto/types.rs

use std::fmt;

use crate::constants::{PUBLIC_KEY_LEN, SALT_LEN};
use crate::utils::b64url_encode;

/// AES-128-GCM key length.
pub const CEK_LEN_16: usize = 16;

/// AES-GCM nonce length.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Length of the big-endian padding-length prefix of an "aesgcm" record.
pub const PAD_PREFIX_LEN: usize = 2;

/// Which piece of key material an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyKind {
    ClientPublicKey,
    AuthSecret,
    ServerPublicKey,
    ReceiverPrivateKey,
    Salt,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::ClientPublicKey => "client public key (p256dh)",
            KeyKind::AuthSecret => "auth secret",
            KeyKind::ServerPublicKey => "server public key",
            KeyKind::ReceiverPrivateKey => "receiver private key",
            KeyKind::Salt => "salt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    /// Key text is not valid base64url.
    InvalidEncoding { key: KeyKind },

    /// Key decoded to the wrong number of bytes.
    InvalidKeyLen { key: KeyKind, expected: usize, actual: usize },

    /// Correct length, but not a point on P-256 (or not a valid scalar).
    InvalidPoint { key: KeyKind },

    /// AEAD tag mismatch (authentication failure).
    TagMismatch,

    /// Decrypted record carries an inconsistent padding field.
    InvalidPadding,

    /// Ciphertext shorter than tag + padding prefix.
    CiphertextTooShort { len: usize },

    /// General derivation or runtime error with context.
    Failure(String),
}

impl fmt::Display for EncryptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EncryptionError::*;
        match self {
            InvalidEncoding { key } =>
                write!(f, "{} is not valid URL-safe base64", key),
            InvalidKeyLen { key, expected, actual } =>
                write!(f, "{} must be {} bytes long, got {}", key, expected, actual),
            InvalidPoint { key } =>
                write!(f, "{} is not a valid P-256 key", key),
            TagMismatch =>
                write!(f, "AEAD tag mismatch"),
            InvalidPadding =>
                write!(f, "invalid record padding"),
            CiphertextTooShort { len } =>
                write!(f, "ciphertext too short: {} bytes", len),
            Failure(msg) =>
                write!(f, "crypto failure: {}", msg),
        }
    }
}

impl std::error::Error for EncryptionError {}

/// Output of one payload encryption.
///
/// Produced fresh per send. The salt and server key are single-use; never
/// cache this value to resend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionResult {
    pub server_public_key: [u8; PUBLIC_KEY_LEN],
    pub salt: [u8; SALT_LEN],
    /// Encrypted record with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncryptionResult {
    /// `Encryption` header value: `salt=<base64url>`.
    pub fn encryption_header(&self) -> String {
        format!("salt={}", b64url_encode(self.salt))
    }

    /// `Crypto-Key` fragment for the payload: `dh=<base64url>`.
    pub fn crypto_key_fragment(&self) -> String {
        format!("dh={}", b64url_encode(self.server_public_key))
    }
}
