//! Client configuration, from `WEB_PUSH_*` environment variables or a JSON
//! document with the same fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::VapidDetails;
use crate::request::ClientDefaults;
use crate::transport::DEFAULT_REQUEST_TIMEOUT;
use crate::types::ValidationError;

/// Subject used when VAPID keys are configured without one.
pub const DEFAULT_VAPID_SUBJECT: &str = "mailto:admin@localhost";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebPushConfig {
    /// Legacy GCM/FCM server key
    pub gcm_api_key: Option<String>,
    /// VAPID subject (`mailto:` or URL)
    pub vapid_subject: Option<String>,
    /// VAPID public key, base64url
    pub vapid_public_key: Option<String>,
    /// VAPID private key, base64url
    pub vapid_private_key: Option<String>,
    /// Default TTL in seconds
    pub ttl: Option<u64>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl WebPushConfig {
    /// Load configuration from `WEB_PUSH_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let number = |name: &str| -> Result<Option<u64>, ValidationError> {
            var(name)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|e| ValidationError::Config(format!("{} is not a number: {}", name, e)))
                })
                .transpose()
        };

        Ok(Self {
            gcm_api_key: var("WEB_PUSH_GCM_API_KEY"),
            vapid_subject: var("WEB_PUSH_VAPID_SUBJECT"),
            vapid_public_key: var("WEB_PUSH_VAPID_PUBLIC_KEY"),
            vapid_private_key: var("WEB_PUSH_VAPID_PRIVATE_KEY"),
            ttl: number("WEB_PUSH_TTL")?,
            request_timeout_secs: number("WEB_PUSH_REQUEST_TIMEOUT_SECS")?,
        })
    }

    /// Load configuration from a JSON document. Missing fields are unset.
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(text).map_err(|e| ValidationError::Config(format!("invalid JSON config: {}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Validate and turn into client defaults.
    pub fn to_defaults(&self) -> Result<ClientDefaults, ValidationError> {
        let vapid_details = match (&self.vapid_public_key, &self.vapid_private_key) {
            (Some(public_key), Some(private_key)) => {
                let subject = self.vapid_subject.as_deref().unwrap_or(DEFAULT_VAPID_SUBJECT);
                let details = VapidDetails::new(subject, public_key.as_str(), private_key.as_str());
                details.validate()?;
                Some(details)
            }
            (None, None) => None,
            _ => {
                return Err(ValidationError::Config(
                    "WEB_PUSH_VAPID_PUBLIC_KEY and WEB_PUSH_VAPID_PRIVATE_KEY must be set together".into(),
                ))
            }
        };

        Ok(ClientDefaults {
            gcm_api_key: self.gcm_api_key.clone(),
            vapid_details,
            ttl: self.ttl,
        })
    }
}

impl std::fmt::Debug for WebPushConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPushConfig")
            .field("gcm_api_key", &self.gcm_api_key.as_ref().map(|_| "<redacted>"))
            .field("vapid_subject", &self.vapid_subject)
            .field("vapid_public_key", &self.vapid_public_key)
            .field("vapid_private_key", &self.vapid_private_key.as_ref().map(|_| "<redacted>"))
            .field("ttl", &self.ttl)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
