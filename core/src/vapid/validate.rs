// ## src/vapid/validate.rs

//! vapid/validate.rs
//! Input rules for VAPID signing. Checked before any cryptography, in the
//! order audience, subject, public key, private key, expiration.

use url::Url;
use zeroize::Zeroizing;

use crate::constants::{DEFAULT_VAPID_EXPIRATION_SECS, MAILTO_PREFIX, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crate::types::ValidationError;
use crate::utils::{b64url_decode, unix_now};

/// Audience must be a non-empty absolute URI (the push service origin).
pub fn validate_audience(audience: &str) -> Result<(), ValidationError> {
    if audience.is_empty() {
        return Err(ValidationError::AudienceMissing);
    }
    Url::parse(audience)
        .map(|_| ())
        .map_err(|_| ValidationError::AudienceInvalid { audience: audience.to_string() })
}

/// Subject must be a `mailto:` address or a non-empty absolute URI.
pub fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.is_empty() {
        return Err(ValidationError::SubjectMissing);
    }
    if subject.starts_with(MAILTO_PREFIX) {
        return Ok(());
    }
    Url::parse(subject)
        .map(|_| ())
        .map_err(|_| ValidationError::SubjectInvalid { subject: subject.to_string() })
}

/// Public key must decode to a 65-byte uncompressed point.
pub fn validate_public_key(public_key: &str) -> Result<[u8; PUBLIC_KEY_LEN], ValidationError> {
    let bytes = b64url_decode(public_key).map_err(|_| ValidationError::PublicKeyEncoding)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::PublicKeyLength { actual: bytes.len() })
}

/// Private key must decode to a 32-byte scalar. The decoded copy is wiped
/// when the returned value is dropped.
pub fn validate_private_key(
    private_key: &str,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>, ValidationError> {
    let bytes = Zeroizing::new(
        b64url_decode(private_key).map_err(|_| ValidationError::PrivateKeyEncoding)?,
    );
    if bytes.len() != PRIVATE_KEY_LEN {
        return Err(ValidationError::PrivateKeyLength { actual: bytes.len() });
    }
    let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Expiration must be strictly later than the current Unix time.
pub fn validate_expiration(expiration: i64) -> Result<(), ValidationError> {
    validate_expiration_at(expiration, unix_now())
}

/// Same as [`validate_expiration`] against an explicit clock reading.
pub fn validate_expiration_at(expiration: i64, now: i64) -> Result<(), ValidationError> {
    if expiration <= now {
        return Err(ValidationError::ExpirationInPast { expiration, now });
    }
    Ok(())
}

/// Validate an explicit expiration or fall back to now + 12 hours.
pub fn resolve_expiration(expiration: Option<i64>) -> Result<i64, ValidationError> {
    let now = unix_now();
    match expiration {
        Some(exp) => {
            validate_expiration_at(exp, now)?;
            Ok(exp)
        }
        None => Ok(now + DEFAULT_VAPID_EXPIRATION_SECS),
    }
}
