// ## src/client.rs

//! client.rs
//! Push client: holds defaults and a transport, runs assemble -> send ->
//! classify.
//!
//! Design notes:
//! - Defaults change only through `&mut self`; a send borrows them immutably,
//!   so a send never observes a half-replaced identity. Callers sharing a
//!   client across tasks wrap it in their own lock.
//! - The transport is an `Arc<dyn PushTransport>`: either created here or
//!   supplied and shared by the caller. It is released when the last handle
//!   drops.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::WebPushConfig;
use crate::models::{Subscription, VapidDetails};
use crate::request::{build_request, classify_response, ClientDefaults, OutboundRequest, PushOutcome, SendOptions};
use crate::transport::{PushTransport, ReqwestTransport, TransportError};
use crate::types::{ValidationError, WebPushError};

pub struct WebPushClient {
    transport: Arc<dyn PushTransport>,
    defaults: ClientDefaults,
}

impl WebPushClient {
    /// Client with its own reqwest transport and no defaults.
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    pub fn with_transport(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport, defaults: ClientDefaults::default() }
    }

    /// Client configured from a [`WebPushConfig`].
    pub fn from_config(config: &WebPushConfig) -> Result<Self, WebPushError> {
        let defaults = config.to_defaults()?;
        let transport = ReqwestTransport::with_timeout(config.request_timeout()).map_err(|e| {
            WebPushError::Validation(ValidationError::Config(format!("HTTP client: {}", e)))
        })?;
        Ok(Self { transport: Arc::new(transport), defaults })
    }

    pub fn defaults(&self) -> &ClientDefaults {
        &self.defaults
    }

    /// Set or clear the default GCM/FCM API key. An empty string is rejected.
    pub fn set_gcm_api_key(&mut self, key: Option<&str>) -> Result<(), ValidationError> {
        match key {
            Some("") => Err(ValidationError::EmptyGcmApiKey),
            other => {
                self.defaults.gcm_api_key = other.map(str::to_string);
                Ok(())
            }
        }
    }

    /// Validate and store the default VAPID identity.
    pub fn set_vapid_details(&mut self, details: VapidDetails) -> Result<(), ValidationError> {
        details.validate()?;
        self.defaults.vapid_details = Some(details);
        Ok(())
    }

    pub fn clear_vapid_details(&mut self) {
        self.defaults.vapid_details = None;
    }

    pub fn set_default_ttl(&mut self, ttl: Option<u64>) {
        self.defaults.ttl = ttl;
    }

    /// Assemble the request a send would issue, without sending it.
    pub fn generate_request_details(
        &self,
        subscription: &Subscription,
        payload: Option<&[u8]>,
        options: &SendOptions,
    ) -> Result<OutboundRequest, WebPushError> {
        build_request(subscription, payload, options, &self.defaults)
    }

    /// Send one message and classify the push service's answer.
    ///
    /// Every call assembles a fresh request. A retry is a new call.
    pub async fn send_notification(
        &self,
        subscription: &Subscription,
        payload: Option<&[u8]>,
        options: &SendOptions,
    ) -> Result<u16, WebPushError> {
        let request = self.generate_request_details(subscription, payload, options)?;

        let response = self.transport.execute(request).await.map_err(|source| {
            warn!(endpoint = %subscription.endpoint, error = %source, "push transport failed");
            WebPushError::Transport { source, subscription: Box::new(subscription.clone()) }
        })?;

        let body = Some(response.body.as_str()).filter(|b| !b.is_empty());
        match classify_response(response.status, body, subscription) {
            PushOutcome::Delivered { status } => {
                info!(endpoint = %subscription.endpoint, status, "push delivered");
                Ok(status)
            }
            PushOutcome::Failed(e) => {
                if e.should_remove_subscription() {
                    info!(endpoint = %subscription.endpoint, status = e.status(), "subscription no longer valid");
                } else {
                    warn!(
                        endpoint = %subscription.endpoint,
                        status = e.status(),
                        category = ?e.category(),
                        retryable = e.is_retryable(),
                        "push rejected"
                    );
                }
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for WebPushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPushClient")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
