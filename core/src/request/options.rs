// ## src/request/options.rs

//! request/options.rs
//! Per-call send options and client-level defaults.
//!
//! A per-call value always wins over the client default. The two are merged
//! once, at the start of request assembly, into a `ResolvedAuth` that the rest
//! of the assembly reads from.

use crate::constants::DEFAULT_TTL_SECS;
use crate::models::VapidDetails;
use crate::types::ValidationError;

/// Options for a single send.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Extra headers, copied verbatim. Reserved names are rejected.
    pub headers: Vec<(String, String)>,
    /// GCM/FCM server key overriding the client default.
    pub gcm_api_key: Option<String>,
    /// VAPID identity overriding the client default.
    pub vapid_details: Option<VapidDetails>,
    /// Time-to-live in seconds.
    pub ttl: Option<u64>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_gcm_api_key(mut self, key: impl Into<String>) -> Self {
        self.gcm_api_key = Some(key.into());
        self
    }

    pub fn with_vapid_details(mut self, details: VapidDetails) -> Self {
        self.vapid_details = Some(details);
        self
    }

    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Client-level defaults, read-only during a send.
#[derive(Clone, Default)]
pub struct ClientDefaults {
    pub gcm_api_key: Option<String>,
    pub vapid_details: Option<VapidDetails>,
    pub ttl: Option<u64>,
}

impl std::fmt::Debug for ClientDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientDefaults")
            .field("gcm_api_key", &self.gcm_api_key.as_ref().map(|_| "<redacted>"))
            .field("vapid_details", &self.vapid_details)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Auth material and TTL after applying per-call overrides.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAuth<'a> {
    pub gcm_api_key: Option<&'a str>,
    pub vapid_details: Option<&'a VapidDetails>,
    pub ttl: u64,
}

impl<'a> ResolvedAuth<'a> {
    /// Coalesce per-call options over defaults. An empty API key is an error
    /// wherever it came from.
    pub fn resolve(
        options: &'a SendOptions,
        defaults: &'a ClientDefaults,
    ) -> Result<Self, ValidationError> {
        let gcm_api_key = options
            .gcm_api_key
            .as_deref()
            .or(defaults.gcm_api_key.as_deref());
        if gcm_api_key == Some("") {
            return Err(ValidationError::EmptyGcmApiKey);
        }

        Ok(Self {
            gcm_api_key,
            vapid_details: options.vapid_details.as_ref().or(defaults.vapid_details.as_ref()),
            ttl: options.ttl.or(defaults.ttl).unwrap_or(DEFAULT_TTL_SECS),
        })
    }
}
