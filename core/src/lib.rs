//! webpush-core
//!
//! Web Push for application servers: "aesgcm" payload encryption, VAPID
//! (ES256) sender identification, request assembly and response
//! classification. Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod models;
pub mod config;

// Cryptographic core
pub mod crypto;
pub mod vapid;

// Request pipeline
pub mod request;
pub mod transport;
pub mod client;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::client::WebPushClient;
    pub use crate::config::WebPushConfig;
    pub use crate::crypto::{decrypt, encrypt, EncryptionError, EncryptionResult};
    pub use crate::models::{Subscription, VapidDetails};
    pub use crate::request::{
        build_request, classify_response, ClientDefaults, DeliveryError, EndpointKind,
        FailureCategory, OutboundRequest, PushOutcome, SendOptions,
    };
    pub use crate::transport::{PushTransport, ReqwestTransport, TransportError, TransportResponse};
    pub use crate::types::{ValidationError, WebPushError};
    pub use crate::vapid::{generate_vapid_keys, sign, vapid_headers, VapidHeaders, VapidKeys};
}
