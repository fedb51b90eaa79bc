// ## src/transport.rs

//! transport.rs
//! HTTP transport seam.
//!
//! Design:
//! - `PushTransport` is the only I/O boundary. It executes one assembled POST
//!   and hands back status, headers and body; classification happens above it.
//! - `ReqwestTransport` is the default implementation. Connection pooling and
//!   TLS are reqwest's concern.
//! - Cancellation is dropping the returned future.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::request::OutboundRequest;

/// Default per-request timeout for [`ReqwestTransport`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The round trip did not complete.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}

/// Raw response from a push service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap a pre-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PushTransport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(request.endpoint.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();

        // A failed body read still leaves a classifiable status.
        let body = match response.bytes().await {
            Ok(raw) => decode_body(status, &raw),
            Err(e) => {
                debug!(status, error = %e, "failed to read push service response body");
                String::new()
            }
        };

        Ok(TransportResponse { status, headers, body })
    }
}

/// Body bytes as text. The declared charset is ignored; bytes that are not
/// UTF-8 are replaced with U+FFFD.
fn decode_body(status: u16, raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(e) => {
            debug!(status, error = %e, "push service response body is not UTF-8");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_body_is_kept_verbatim() {
        assert_eq!(decode_body(400, "Ungültig ✓".as_bytes()), "Ungültig ✓");
        assert_eq!(decode_body(204, b""), "");
    }

    #[test]
    fn invalid_bytes_become_replacement_characters() {
        assert_eq!(decode_body(400, b"bad \xff key"), "bad \u{FFFD} key");
    }
}
