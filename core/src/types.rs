use std::fmt;

use crate::crypto::EncryptionError;
use crate::models::Subscription;
use crate::request::DeliveryError;
use crate::transport::TransportError;

/// Malformed or missing caller input.
///
/// Always raised before any cryptography or network I/O; never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Audience is empty.
    AudienceMissing,

    /// Audience is not an absolute URI.
    AudienceInvalid { audience: String },

    /// Subject is empty.
    SubjectMissing,

    /// Subject is neither an absolute URI nor a `mailto:` address.
    SubjectInvalid { subject: String },

    /// VAPID public key is not base64url.
    PublicKeyEncoding,

    /// VAPID public key decoded to the wrong length.
    PublicKeyLength { actual: usize },

    /// VAPID private key is not base64url.
    PrivateKeyEncoding,

    /// VAPID private key decoded to the wrong length.
    PrivateKeyLength { actual: usize },

    /// Private key has the right length but is not a usable P-256 scalar.
    PrivateKeyInvalid,

    /// Explicit expiration is not strictly in the future.
    ExpirationInPast { expiration: i64, now: i64 },

    /// Push endpoint is not an absolute URL with a host.
    EndpointInvalid { endpoint: String },

    /// Non-empty payload for a subscription without `p256dh` / `auth`.
    MissingSubscriptionKeys,

    /// GCM/FCM API key given as an empty string.
    EmptyGcmApiKey,

    /// Caller tried to set a header the library owns.
    ReservedHeader { name: String },

    /// Caller supplied the same header name more than once.
    DuplicateHeader { name: String },

    /// JWT segment could not be serialized.
    Token(String),

    /// Environment configuration is inconsistent.
    Config(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationError::*;
        match self {
            AudienceMissing =>
                write!(f, "No audience could be generated for VAPID."),
            AudienceInvalid { audience } =>
                write!(f, "VAPID audience must be an absolute URL containing the origin of a push service: {}", audience),
            SubjectMissing =>
                write!(f, "The subject value must be a string containing a URL or 'mailto:' address."),
            SubjectInvalid { subject } =>
                write!(f, "VAPID subject is not a URL or 'mailto:' address: {}", subject),
            PublicKeyEncoding =>
                write!(f, "VAPID public key must be URL safe base64."),
            PublicKeyLength { actual } =>
                write!(f, "VAPID public key should be 65 bytes long when decoded, got {}.", actual),
            PrivateKeyEncoding =>
                write!(f, "VAPID private key must be URL safe base64."),
            PrivateKeyLength { actual } =>
                write!(f, "VAPID private key should be 32 bytes long when decoded, got {}.", actual),
            PrivateKeyInvalid =>
                write!(f, "VAPID private key is not a valid P-256 scalar."),
            ExpirationInPast { expiration, now } =>
                write!(f, "VAPID expiration must be a unix timestamp in the future ({} <= {}).", expiration, now),
            EndpointInvalid { endpoint } =>
                write!(f, "Push subscription endpoint must be an absolute URL: {}", endpoint),
            MissingSubscriptionKeys =>
                write!(f, "To send a message with a payload, the subscription must have 'auth' and 'p256dh' keys."),
            EmptyGcmApiKey =>
                write!(f, "The GCM API Key should be a non-empty string or null."),
            DuplicateHeader { name } =>
                write!(f, "Header '{}' was supplied more than once.", name),
            ReservedHeader { name } =>
                write!(f, "Header '{}' is set by the library and cannot be overridden.", name),
            Token(msg) =>
                write!(f, "VAPID token encoding failed: {}", msg),
            Config(msg) =>
                write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unified error for a send: validation, encryption, transport or delivery.
///
/// Each variant past validation carries the subscription it was raised for.
#[derive(Debug, thiserror::Error)]
pub enum WebPushError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("encryption error for {}: {source}", .subscription.endpoint)]
    Encryption {
        #[source]
        source: EncryptionError,
        subscription: Box<Subscription>,
    },

    #[error("transport error for {}: {source}", .subscription.endpoint)]
    Transport {
        #[source]
        source: TransportError,
        subscription: Box<Subscription>,
    },

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl WebPushError {
    /// Subscription the failure was raised for, if any.
    pub fn subscription(&self) -> Option<&Subscription> {
        match self {
            WebPushError::Validation(_) => None,
            WebPushError::Encryption { subscription, .. } => Some(subscription.as_ref()),
            WebPushError::Transport { subscription, .. } => Some(subscription.as_ref()),
            WebPushError::Delivery(e) => Some(e.subscription()),
        }
    }
}
