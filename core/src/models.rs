//! Subscription and VAPID identity models.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::ValidationError;
use crate::vapid::{validate_expiration, validate_private_key, validate_public_key, validate_subject};

/// A user agent's push subscription.
///
/// Keys are base64url text exactly as the browser reports them. Both are
/// optional: a subscription without keys can still receive empty pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Subscriber's P-256 ECDH public key (65 bytes decoded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p256dh: Option<String>,
    /// Shared auth secret (16 bytes decoded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl Subscription {
    pub fn new(
        endpoint: impl Into<String>,
        p256dh: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            p256dh: Some(p256dh.into()),
            auth: Some(auth.into()),
        }
    }

    /// Subscription usable only for payload-less pushes.
    pub fn without_keys(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), p256dh: None, auth: None }
    }

    /// Both keys present and non-empty.
    pub fn keys(&self) -> Option<(&str, &str)> {
        match (self.p256dh.as_deref(), self.auth.as_deref()) {
            (Some(p256dh), Some(auth)) if !p256dh.is_empty() && !auth.is_empty() => {
                Some((p256dh, auth))
            }
            _ => None,
        }
    }
}

/// VAPID identity of the application server.
///
/// Keys are base64url text: the public key is an uncompressed P-256 point,
/// the private key a raw 32-byte scalar. `expiration` is an absolute Unix
/// timestamp; `None` means "now + 12 hours" at signing time.
///
/// The private key is wiped from memory when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct VapidDetails {
    pub subject: String,
    pub public_key: String,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
}

impl VapidDetails {
    pub fn new(
        subject: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: i64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Check subject, keys and (when set) expiration.
    ///
    /// Runs every time details are handed to a client or a send; an
    /// expiration that was valid yesterday may not be today.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_subject(&self.subject)?;
        validate_public_key(&self.public_key)?;
        validate_private_key(&self.private_key)?;
        if let Some(expiration) = self.expiration {
            validate_expiration(expiration)?;
        }
        Ok(())
    }
}

impl fmt::Debug for VapidDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VapidDetails")
            .field("subject", &self.subject)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}
