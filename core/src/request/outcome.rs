// ## src/request/outcome.rs

//! request/outcome.rs
//! Classification of push-service responses.
//!
//! Design notes:
//! - Any 2xx is delivery; everything else becomes a `DeliveryError`.
//! - Canonical messages are stable strings callers match on. A non-empty
//!   response body is appended as ". Details: <body>".
//! - 404 and 410 both mean the subscription is gone and should be deleted.

use std::fmt;

use crate::models::Subscription;

/// Failure class of a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    BadRequest,
    PayloadTooLarge,
    RateLimited,
    SubscriptionExpired,
    Unexpected(u16),
}

impl FailureCategory {
    /// `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            413 => Some(Self::PayloadTooLarge),
            429 => Some(Self::RateLimited),
            404 | 410 => Some(Self::SubscriptionExpired),
            other => Some(Self::Unexpected(other)),
        }
    }

    pub fn canonical_message(&self) -> String {
        match self {
            Self::BadRequest => "Bad Request".to_string(),
            Self::PayloadTooLarge => "Payload too large".to_string(),
            Self::RateLimited => "Too many request".to_string(),
            Self::SubscriptionExpired => "Subscription no longer valid".to_string(),
            Self::Unexpected(status) => format!("Received unexpected response code: {}", status),
        }
    }
}

/// A push service refused the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    category: FailureCategory,
    status: u16,
    message: String,
    details: Option<String>,
    subscription: Box<Subscription>,
}

impl DeliveryError {
    pub fn new(status: u16, category: FailureCategory, body: Option<&str>, subscription: &Subscription) -> Self {
        let details = body.filter(|b| !b.is_empty()).map(str::to_string);
        let mut message = category.canonical_message();
        if let Some(details) = &details {
            message.push_str(". Details: ");
            message.push_str(details);
        }
        Self {
            category,
            status,
            message,
            details,
            subscription: Box::new(subscription.clone()),
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Canonical message, plus details when the service sent a body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw response body, if non-empty.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// The endpoint is gone; the caller should delete the subscription.
    pub fn should_remove_subscription(&self) -> bool {
        self.category == FailureCategory::SubscriptionExpired
    }

    /// Worth retrying later: rate limiting or a server-side error.
    pub fn is_retryable(&self) -> bool {
        match self.category {
            FailureCategory::RateLimited => true,
            FailureCategory::Unexpected(status) => (500..=599).contains(&status),
            _ => false,
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DeliveryError {}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Delivered { status: u16 },
    Failed(DeliveryError),
}

impl PushOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PushOutcome::Delivered { .. })
    }

    pub fn into_result(self) -> Result<u16, DeliveryError> {
        match self {
            PushOutcome::Delivered { status } => Ok(status),
            PushOutcome::Failed(e) => Err(e),
        }
    }
}

/// Map a response status and body to an outcome.
pub fn classify_response(status: u16, body: Option<&str>, subscription: &Subscription) -> PushOutcome {
    match FailureCategory::from_status(status) {
        None => PushOutcome::Delivered { status },
        Some(category) => PushOutcome::Failed(DeliveryError::new(status, category, body, subscription)),
    }
}
