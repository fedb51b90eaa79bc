// ## src/request/builder.rs

//! request/builder.rs
//! Outbound request assembly.
//!
//! Dispatch order:
//! 1. TTL, then caller headers (reserved or repeated names rejected).
//! 2. Payload present: encrypt, set body + Content-Type / Content-Encoding /
//!    Encryption, keep a pending `dh=` fragment.
//! 3. Legacy GCM endpoint with an API key: `Authorization: key=...`, no VAPID.
//! 4. Else VAPID details present: sign for the endpoint origin and combine
//!    Crypto-Key as `dh=...;p256ecdsa=...`.
//! 5. Else FCM endpoint with an API key: `Authorization: key=...`.
//! 6. Else no Authorization.
//!
//! Validation (endpoint, headers, keys, VAPID details) all runs before the
//! first cryptographic call.

use bytes::Bytes;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use url::Url;

use crate::constants::{endpoints, headers, CONTENT_ENCODING_AESGCM, CONTENT_TYPE_OCTET_STREAM};
use crate::crypto::encrypt_with_rng;
use crate::models::{Subscription, VapidDetails};
use crate::request::options::{ClientDefaults, ResolvedAuth, SendOptions};
use crate::types::{ValidationError, WebPushError};
use crate::vapid::vapid_headers;

/// Push service family, decided by literal endpoint prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    LegacyGcm,
    Fcm,
    WebPush,
}

impl EndpointKind {
    pub fn classify(endpoint: &str) -> Self {
        if endpoint.starts_with(endpoints::GCM_SEND) {
            EndpointKind::LegacyGcm
        } else if endpoint.starts_with(endpoints::FCM_SEND) {
            EndpointKind::Fcm
        } else {
            EndpointKind::WebPush
        }
    }
}

/// Which Authorization scheme a request ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    GcmKey,
    Vapid,
    Unauthenticated,
}

/// A fully assembled POST, ready for a transport.
///
/// Built fresh per send. Retrying means building again: the salt, ephemeral
/// key and token must not be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl OutboundRequest {
    fn new(endpoint: &str) -> Self {
        Self { endpoint: endpoint.to_string(), headers: Vec::new(), body: Bytes::new() }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn method(&self) -> &'static str {
        "POST"
    }

    fn push_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.push((name.to_string(), value.into()));
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::EndpointInvalid { endpoint: endpoint.to_string() };
    let url = Url::parse(endpoint).map_err(|_| invalid())?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}

/// Push service origin used as the VAPID audience. Port is not included.
pub fn audience_for(url: &Url) -> Result<String, ValidationError> {
    let host = url.host_str().ok_or(ValidationError::AudienceMissing)?;
    Ok(format!("{}://{}", url.scheme(), host))
}

/// Reserved names are rejected, and so is any name given twice (compared
/// case-insensitively).
fn check_extra_headers(extra: &[(String, String)]) -> Result<(), ValidationError> {
    for (i, (name, _)) in extra.iter().enumerate() {
        if headers::RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name)) {
            return Err(ValidationError::ReservedHeader { name: name.clone() });
        }
        if extra[..i].iter().any(|(seen, _)| seen.eq_ignore_ascii_case(name)) {
            return Err(ValidationError::DuplicateHeader { name: name.clone() });
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Plan<'a> {
    GcmKey(&'a str),
    Vapid(&'a VapidDetails),
    Unauthenticated,
}

fn plan_auth<'a>(kind: EndpointKind, auth: &ResolvedAuth<'a>) -> Plan<'a> {
    match (kind, auth.gcm_api_key, auth.vapid_details) {
        (EndpointKind::LegacyGcm, Some(key), _) => Plan::GcmKey(key),
        (_, _, Some(details)) => Plan::Vapid(details),
        (EndpointKind::Fcm, Some(key), _) => Plan::GcmKey(key),
        _ => Plan::Unauthenticated,
    }
}

/// Assemble a request using the operating system RNG.
pub fn build_request(
    subscription: &Subscription,
    payload: Option<&[u8]>,
    options: &SendOptions,
    defaults: &ClientDefaults,
) -> Result<OutboundRequest, WebPushError> {
    build_request_with_rng(subscription, payload, options, defaults, &mut OsRng)
}

/// Assemble a request, drawing encryption randomness from `rng`.
pub fn build_request_with_rng<R: RngCore + CryptoRng>(
    subscription: &Subscription,
    payload: Option<&[u8]>,
    options: &SendOptions,
    defaults: &ClientDefaults,
    rng: &mut R,
) -> Result<OutboundRequest, WebPushError> {
    let url = parse_endpoint(&subscription.endpoint)?;
    check_extra_headers(&options.headers)?;
    let auth = ResolvedAuth::resolve(options, defaults)?;

    let payload = payload.filter(|p| !p.is_empty());
    let keys = match payload {
        Some(_) => Some(subscription.keys().ok_or(ValidationError::MissingSubscriptionKeys)?),
        None => None,
    };

    let kind = EndpointKind::classify(&subscription.endpoint);
    let plan = plan_auth(kind, &auth);
    if let Plan::Vapid(details) = &plan {
        details.validate()?;
    }

    let mut request = OutboundRequest::new(&subscription.endpoint);
    request.push_header(headers::TTL, auth.ttl.to_string());
    for (name, value) in &options.headers {
        request.push_header(name, value.clone());
    }

    let mut crypto_key: Option<String> = None;
    if let (Some(plaintext), Some((p256dh, auth_secret))) = (payload, keys) {
        let encrypted = encrypt_with_rng(p256dh, auth_secret, plaintext, rng).map_err(|source| {
            WebPushError::Encryption { source, subscription: Box::new(subscription.clone()) }
        })?;

        request.push_header(headers::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM);
        request.push_header(headers::CONTENT_ENCODING, CONTENT_ENCODING_AESGCM);
        request.push_header(headers::ENCRYPTION, encrypted.encryption_header());
        crypto_key = Some(encrypted.crypto_key_fragment());
        request.body = Bytes::from(encrypted.ciphertext);
    }

    let path = match plan {
        Plan::GcmKey(key) => {
            request.push_header(headers::AUTHORIZATION, format!("key={}", key));
            AuthPath::GcmKey
        }
        Plan::Vapid(details) => {
            let signed = vapid_headers(&audience_for(&url)?, details)?;
            request.push_header(headers::AUTHORIZATION, signed.authorization);
            crypto_key = Some(match crypto_key {
                Some(dh) => format!("{};{}", dh, signed.crypto_key),
                None => signed.crypto_key,
            });
            AuthPath::Vapid
        }
        Plan::Unauthenticated => AuthPath::Unauthenticated,
    };

    if let Some(value) = crypto_key {
        request.push_header(headers::CRYPTO_KEY, value);
    }

    debug!(
        endpoint = %subscription.endpoint,
        kind = ?kind,
        auth = ?path,
        ttl = auth.ttl,
        body_len = request.body.len(),
        "assembled push request"
    );

    Ok(request)
}
