#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use p256::SecretKey;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use webpush_core::client::WebPushClient;
    use webpush_core::models::{Subscription, VapidDetails};
    use webpush_core::request::{FailureCategory, OutboundRequest, SendOptions};
    use webpush_core::transport::{PushTransport, ReqwestTransport, TransportError, TransportResponse};
    use webpush_core::types::{ValidationError, WebPushError};
    use webpush_core::utils::b64url_encode;
    use webpush_core::vapid::generate_vapid_keys;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn subscription(endpoint: String) -> Subscription {
        let mut rng = StdRng::seed_from_u64(42);
        let secret = SecretKey::random(&mut rng);
        let mut auth = [0u8; 16];
        rng.fill_bytes(&mut auth);
        Subscription::new(
            endpoint,
            b64url_encode(secret.public_key().to_encoded_point(false).as_bytes()),
            b64url_encode(auth),
        )
    }

    fn vapid() -> VapidDetails {
        generate_vapid_keys().into_details("mailto:ops@example.com")
    }

    fn client() -> WebPushClient {
        let mut client = WebPushClient::with_transport(Arc::new(ReqwestTransport::new().unwrap()));
        client.set_vapid_details(vapid()).unwrap();
        client
    }

    /// Records every request and answers with a fixed status.
    struct RecordingTransport {
        status: u16,
        seen: Mutex<Vec<OutboundRequest>>,
    }

    #[async_trait]
    impl PushTransport for RecordingTransport {
        async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(TransportResponse { status: self.status, headers: Vec::new(), body: String::new() })
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl PushTransport for FailingTransport {
        async fn execute(&self, _request: OutboundRequest) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Other("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn test_payload_to_vapid_endpoint_delivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/wpush/abc"))
            .and(header("Content-Encoding", "aesgcm"))
            .and(header("Content-Type", "application/octet-stream"))
            .and(header("TTL", "2419200"))
            .and(header_exists("Authorization"))
            .and(header_exists("Crypto-Key"))
            .and(header_exists("Encryption"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let sub = subscription(format!("{}/wpush/abc", server.uri()));
        let status = client()
            .send_notification(&sub, Some(b"123".as_slice()), &SendOptions::new())
            .await
            .unwrap();
        assert_eq!(status, 201);
    }

    #[tokio::test]
    async fn test_gone_subscription_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let sub = subscription(format!("{}/wpush/gone", server.uri()));
        let err = client()
            .send_notification(&sub, Some(b"123".as_slice()), &SendOptions::new())
            .await
            .unwrap_err();

        match err {
            WebPushError::Delivery(e) => {
                assert_eq!(e.category(), FailureCategory::SubscriptionExpired);
                assert_eq!(e.message(), "Subscription no longer valid");
                assert_eq!(e.subscription(), &sub);
                assert!(e.should_remove_subscription());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_with_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let sub = subscription(format!("{}/wpush/busy", server.uri()));
        let err = client().send_notification(&sub, None, &SendOptions::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Too many request. Details: slow down");
        match err {
            WebPushError::Delivery(e) => assert!(e.is_retryable()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_error_details_keep_utf8_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_raw("Ungültig ✓".as_bytes().to_vec(), "text/plain; charset=iso-8859-1"),
            )
            .mount(&server)
            .await;

        let sub = subscription(format!("{}/wpush/bad", server.uri()));
        let err = client().send_notification(&sub, None, &SendOptions::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad Request. Details: Ungültig ✓");
    }

    #[tokio::test]
    async fn test_error_details_replace_invalid_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(413).set_body_bytes(b"too \xff big".to_vec()))
            .mount(&server)
            .await;

        let sub = subscription(format!("{}/wpush/large", server.uri()));
        let err = client().send_notification(&sub, None, &SendOptions::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Payload too large. Details: too \u{FFFD} big");
    }

    #[tokio::test]
    async fn test_each_send_assembles_fresh_request() {
        let transport = Arc::new(RecordingTransport { status: 201, seen: Mutex::new(Vec::new()) });
        let mut client = WebPushClient::with_transport(transport.clone());
        client.set_vapid_details(vapid()).unwrap();

        let sub = subscription("https://push.example.com/wpush/1".into());
        for _ in 0..2 {
            client.send_notification(&sub, Some(b"again".as_slice()), &SendOptions::new()).await.unwrap();
        }

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_ne!(seen[0].header("Encryption"), seen[1].header("Encryption"));
        assert_ne!(seen[0].body, seen[1].body);
    }

    #[tokio::test]
    async fn test_transport_failure_carries_subscription() {
        let client = WebPushClient::with_transport(Arc::new(FailingTransport));
        let sub = subscription("https://push.example.com/wpush/2".into());

        let err = client.send_notification(&sub, None, &SendOptions::new()).await.unwrap_err();
        assert!(matches!(err, WebPushError::Transport { .. }));
        assert_eq!(err.subscription(), Some(&sub));
    }

    #[tokio::test]
    async fn test_validation_fails_before_transport() {
        let transport = Arc::new(RecordingTransport { status: 201, seen: Mutex::new(Vec::new()) });
        let client = WebPushClient::with_transport(transport.clone());

        let sub = Subscription::without_keys("https://push.example.com/wpush/3");
        let err = client
            .send_notification(&sub, Some(b"data".as_slice()), &SendOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, WebPushError::Validation(ValidationError::MissingSubscriptionKeys)));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_default_setters() {
        let mut client = WebPushClient::with_transport(Arc::new(FailingTransport));

        assert_eq!(client.set_gcm_api_key(Some("")).unwrap_err(), ValidationError::EmptyGcmApiKey);
        client.set_gcm_api_key(Some("server-key")).unwrap();
        assert_eq!(client.defaults().gcm_api_key.as_deref(), Some("server-key"));
        client.set_gcm_api_key(None).unwrap();
        assert!(client.defaults().gcm_api_key.is_none());

        let mut bad = vapid();
        bad.subject = "not a subject".into();
        assert!(client.set_vapid_details(bad).is_err());
        assert!(client.defaults().vapid_details.is_none());

        client.set_vapid_details(vapid()).unwrap();
        assert!(client.defaults().vapid_details.is_some());
        client.clear_vapid_details();
        assert!(client.defaults().vapid_details.is_none());
    }

    #[test]
    fn test_generate_request_details_uses_defaults() {
        let mut client = WebPushClient::with_transport(Arc::new(FailingTransport));
        client.set_gcm_api_key(Some("teststring")).unwrap();
        client.set_vapid_details(vapid()).unwrap();

        let sub = subscription("https://android.googleapis.com/gcm/send/X".into());
        let request = client.generate_request_details(&sub, None, &SendOptions::new()).unwrap();
        assert_eq!(request.header("Authorization"), Some("key=teststring"));
    }
}
