#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use webpush_core::models::Subscription;
    use webpush_core::request::{classify_response, FailureCategory, PushOutcome};
    use webpush_core::types::WebPushError;

    fn sub() -> Subscription {
        Subscription::new("https://push.example.com/wpush/abc", "p256dh-key", "auth-secret")
    }

    fn failure(status: u16, body: Option<&str>) -> webpush_core::request::DeliveryError {
        match classify_response(status, body, &sub()) {
            PushOutcome::Failed(e) => e,
            PushOutcome::Delivered { .. } => panic!("status {} should not be delivered", status),
        }
    }

    #[test]
    fn test_canonical_messages() {
        let cases = [
            (400, "Bad Request", FailureCategory::BadRequest),
            (413, "Payload too large", FailureCategory::PayloadTooLarge),
            (429, "Too many request", FailureCategory::RateLimited),
            (404, "Subscription no longer valid", FailureCategory::SubscriptionExpired),
            (410, "Subscription no longer valid", FailureCategory::SubscriptionExpired),
            (500, "Received unexpected response code: 500", FailureCategory::Unexpected(500)),
        ];

        for (status, message, category) in cases {
            let e = failure(status, None);
            assert_eq!(e.message(), message);
            assert_eq!(e.to_string(), message);
            assert_eq!(e.category(), category);
            assert_eq!(e.status(), status);
            assert!(e.details().is_none());
        }
    }

    #[test]
    fn test_details_appended_verbatim() {
        let e = failure(400, Some("  missing TTL\n"));
        assert_eq!(e.message(), "Bad Request. Details:   missing TTL\n");
        assert_eq!(e.details(), Some("  missing TTL\n"));

        let e = failure(500, Some("upstream down"));
        assert_eq!(e.message(), "Received unexpected response code: 500. Details: upstream down");
    }

    #[test]
    fn test_empty_body_adds_nothing() {
        assert_eq!(failure(413, Some("")).message(), "Payload too large");
    }

    #[test]
    fn test_failure_carries_subscription() {
        let e = failure(410, Some("gone"));
        assert_eq!(e.subscription(), &sub());
        assert!(e.should_remove_subscription());
        assert!(!failure(400, None).should_remove_subscription());

        let err: WebPushError = e.into();
        assert_eq!(err.subscription(), Some(&sub()));
        assert_eq!(err.to_string(), "Subscription no longer valid. Details: gone");
    }

    #[test]
    fn test_success_statuses() {
        for status in [200u16, 201, 202, 204] {
            let outcome = classify_response(status, Some("ignored"), &sub());
            assert!(outcome.is_delivered());
            assert_eq!(outcome.into_result().unwrap(), status);
        }
    }

    proptest! {
        #[test]
        fn prop_any_2xx_is_delivered(status in 200u16..300) {
            prop_assert_eq!(classify_response(status, None, &sub()), PushOutcome::Delivered { status });
        }

        #[test]
        fn prop_any_non_2xx_fails_with_status(status in (100u16..600).prop_filter("non-2xx", |s| !(200..300).contains(s))) {
            let e = failure(status, Some("x"));
            prop_assert_eq!(e.status(), status);
            prop_assert!(e.message().ends_with(". Details: x"));
        }
    }
}
