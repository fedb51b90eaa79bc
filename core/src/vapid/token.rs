// ## src/vapid/token.rs

//! vapid/token.rs
//! ES256 compact token for VAPID.
//!
//! Layout:
//! - b64url({"typ":"JWT","alg":"ES256"}) . b64url({"aud","exp","sub"}) . b64url(r || s)
//! - The signature is the raw fixed-width 64-byte form JWS mandates, not DER.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use serde::Serialize;

use crate::models::VapidDetails;
use crate::types::ValidationError;
use crate::utils::b64url_encode;
use crate::vapid::validate::{
    resolve_expiration, validate_audience, validate_private_key, validate_public_key,
    validate_subject,
};

/// Authorization scheme prefix for VAPID tokens.
pub const WEBPUSH_AUTH_SCHEME: &str = "WebPush ";

/// Crypto-Key parameter carrying the VAPID public key.
pub const P256ECDSA_PARAM: &str = "p256ecdsa=";

#[derive(Serialize)]
struct JwtHeader<'a> {
    typ: &'a str,
    alg: &'a str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    aud: &'a str,
    exp: i64,
    sub: &'a str,
}

/// Header pair produced by a VAPID signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VapidHeaders {
    /// `WebPush <token>`.
    pub authorization: String,
    /// `p256ecdsa=<public key>`.
    pub crypto_key: String,
}

impl VapidHeaders {
    /// The bare token, without the `WebPush ` scheme.
    pub fn token(&self) -> &str {
        self.authorization
            .strip_prefix(WEBPUSH_AUTH_SCHEME)
            .unwrap_or(&self.authorization)
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, ValidationError> {
    let json = serde_json::to_vec(value).map_err(|e| ValidationError::Token(e.to_string()))?;
    Ok(b64url_encode(json))
}

/// Validate inputs, then sign a VAPID token for `audience`.
///
/// `expiration` defaults to now + 12 hours. Validation happens in full before
/// the private key is turned into a signing key.
pub fn sign(
    audience: &str,
    subject: &str,
    public_key_b64: &str,
    private_key_b64: &str,
    expiration: Option<i64>,
) -> Result<VapidHeaders, ValidationError> {
    validate_audience(audience)?;
    validate_subject(subject)?;
    validate_public_key(public_key_b64)?;
    let scalar = validate_private_key(private_key_b64)?;
    let exp = resolve_expiration(expiration)?;

    let signing_key =
        SigningKey::from_slice(scalar.as_slice()).map_err(|_| ValidationError::PrivateKeyInvalid)?;

    let header = encode_segment(&JwtHeader { typ: "JWT", alg: "ES256" })?;
    let claims = encode_segment(&JwtClaims { aud: audience, exp, sub: subject })?;
    let signing_input = format!("{}.{}", header, claims);

    let signature: Signature = signing_key.sign(signing_input.as_bytes());
    let token = format!("{}.{}", signing_input, b64url_encode(signature.to_bytes()));

    Ok(VapidHeaders {
        authorization: format!("{}{}", WEBPUSH_AUTH_SCHEME, token),
        crypto_key: format!("{}{}", P256ECDSA_PARAM, public_key_b64),
    })
}

/// Sign for `audience` with a stored identity.
pub fn vapid_headers(audience: &str, details: &VapidDetails) -> Result<VapidHeaders, ValidationError> {
    sign(
        audience,
        &details.subject,
        &details.public_key,
        &details.private_key,
        details.expiration,
    )
}
