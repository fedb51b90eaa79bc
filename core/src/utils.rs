//! utils.rs
//! Base64url codec and clock helpers.
//!
//! Design notes:
//! - Encoding is always URL-safe without padding (what browsers hand out and
//!   what push services expect).
//! - Decoding tolerates trailing '=' padding, since some subscription stores
//!   keep padded values, but rejects the standard alphabet.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::{DecodeError, Engine};

/// Encode bytes as unpadded base64url.
#[inline]
pub fn b64url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode base64url text, normalizing optional trailing padding.
#[inline]
pub fn b64url_decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(text.trim_end_matches('='))
}

/// Current Unix time in whole seconds.
#[inline]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
