//! constants.rs
//! Protocol constants shared by the encryption engine, the VAPID signer and
//! request assembly.
//!
//! Notes:
//! - Labels are byte-exact; user agents re-derive keys from the same strings.
//! - Endpoint prefixes are literal string prefixes, not parsed URLs.

/// Uncompressed SEC1 P-256 point: 0x04 || X || Y.
pub const PUBLIC_KEY_LEN: usize = 65;

/// Raw big-endian P-256 scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Subscription auth secret.
pub const AUTH_SECRET_LEN: usize = 16;

/// Per-message HKDF salt.
pub const SALT_LEN: usize = 16;

/// ECDH shared secret (x-coordinate) and PRK length.
pub const SHARED_SECRET_LEN: usize = 32;

/// Raw ES256 signature, r || s.
pub const SIGNATURE_LEN: usize = 64;

/// Default time-to-live: 4 weeks, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 2_419_200;

/// Default VAPID token lifetime: 12 hours, in seconds.
pub const DEFAULT_VAPID_EXPIRATION_SECS: i64 = 43_200;

/// Content-encoding token for the draft "aesgcm" scheme.
pub const CONTENT_ENCODING_AESGCM: &str = "aesgcm";

/// Body content type for encrypted payloads.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// HKDF info labels ("Content-Encoding: <label>" || 0x00).
pub mod labels {
    pub const AUTH_INFO: &[u8] = b"Content-Encoding: auth\0";
    pub const KEY_INFO: &[u8] = b"Content-Encoding: aesgcm\0";
    pub const NONCE_INFO: &[u8] = b"Content-Encoding: nonce\0";

    /// Curve label opening the per-message context.
    pub const CONTEXT_CURVE: &[u8] = b"P-256\0";
}

/// Literal push-service endpoint prefixes.
pub mod endpoints {
    pub const GCM_SEND: &str = "https://android.googleapis.com/gcm/send";
    pub const FCM_SEND: &str = "https://fcm.googleapis.com/fcm/send";
}

/// Wire header names.
pub mod headers {
    pub const TTL: &str = "TTL";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_ENCODING: &str = "Content-Encoding";
    pub const ENCRYPTION: &str = "Encryption";
    pub const CRYPTO_KEY: &str = "Crypto-Key";
    pub const AUTHORIZATION: &str = "Authorization";

    /// Names callers may not supply through extra headers.
    pub const RESERVED: &[&str] = &[
        TTL,
        CONTENT_TYPE,
        CONTENT_ENCODING,
        ENCRYPTION,
        CRYPTO_KEY,
        AUTHORIZATION,
    ];
}

/// Scheme prefix accepted for VAPID subjects besides absolute URLs.
pub const MAILTO_PREFIX: &str = "mailto:";
