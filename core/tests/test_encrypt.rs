#[cfg(test)]
mod tests {
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use p256::SecretKey;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use webpush_core::crypto::{decrypt, encrypt, encrypt_with_rng, EncryptionError, KeyKind};
    use webpush_core::utils::b64url_encode;

    struct Receiver {
        private_key: [u8; 32],
        public_key_b64: String,
        auth_secret: [u8; 16],
        auth_secret_b64: String,
    }

    fn receiver(seed: u64) -> Receiver {
        let mut rng = StdRng::seed_from_u64(seed);
        let secret = SecretKey::random(&mut rng);
        let mut auth_secret = [0u8; 16];
        rng.fill_bytes(&mut auth_secret);

        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&secret.to_bytes());

        Receiver {
            private_key,
            public_key_b64: b64url_encode(secret.public_key().to_encoded_point(false).as_bytes()),
            auth_secret,
            auth_secret_b64: b64url_encode(auth_secret),
        }
    }

    fn open(r: &Receiver, result: &webpush_core::crypto::EncryptionResult) -> Result<Vec<u8>, EncryptionError> {
        decrypt(&r.private_key, &r.auth_secret, &result.server_public_key, &result.salt, &result.ciphertext)
    }

    #[test]
    fn test_round_trip() {
        let r = receiver(1);
        let result = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"hello push").unwrap();

        assert_eq!(result.server_public_key[0], 0x04);
        // u16 padding prefix + plaintext + 16-byte tag
        assert_eq!(result.ciphertext.len(), 2 + 10 + 16);
        assert_eq!(open(&r, &result).unwrap(), b"hello push");
    }

    #[test]
    fn test_empty_plaintext_still_seals_padding_field() {
        let r = receiver(2);
        let result = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"").unwrap();
        assert_eq!(result.ciphertext.len(), 2 + 16);
        assert!(open(&r, &result).unwrap().is_empty());
    }

    #[test]
    fn test_fresh_salt_and_server_key_per_call() {
        let r = receiver(3);
        let a = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"same").unwrap();
        let b = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"same").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.server_public_key, b.server_public_key);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let r = receiver(4);
        let a = encrypt_with_rng(&r.public_key_b64, &r.auth_secret_b64, b"pinned", &mut StdRng::seed_from_u64(99)).unwrap();
        let b = encrypt_with_rng(&r.public_key_b64, &r.auth_secret_b64, b"pinned", &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(open(&r, &a).unwrap(), b"pinned");
    }

    #[test]
    fn test_wrong_auth_secret_fails_tag() {
        let r = receiver(5);
        let result = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"secret").unwrap();
        let mut wrong = r.auth_secret;
        wrong[0] ^= 0xff;
        let err = decrypt(&r.private_key, &wrong, &result.server_public_key, &result.salt, &result.ciphertext)
            .unwrap_err();
        assert_eq!(err, EncryptionError::TagMismatch);
    }

    #[test]
    fn test_tampered_ciphertext_fails_tag() {
        let r = receiver(6);
        let mut result = encrypt(&r.public_key_b64, &r.auth_secret_b64, b"secret").unwrap();
        result.ciphertext[0] ^= 0x01;
        assert_eq!(open(&r, &result).unwrap_err(), EncryptionError::TagMismatch);
    }

    #[test]
    fn test_short_public_key_rejected() {
        let r = receiver(7);
        let secret = SecretKey::from_slice(&r.private_key).unwrap();
        let point = secret.public_key().to_encoded_point(false);
        let short = b64url_encode(&point.as_bytes()[..64]);
        let err = encrypt(&short, &r.auth_secret_b64, b"x").unwrap_err();
        assert_eq!(
            err,
            EncryptionError::InvalidKeyLen { key: KeyKind::ClientPublicKey, expected: 65, actual: 64 }
        );
    }

    #[test]
    fn test_short_auth_secret_rejected() {
        let r = receiver(8);
        let err = encrypt(&r.public_key_b64, &b64url_encode([0u8; 12]), b"x").unwrap_err();
        assert_eq!(
            err,
            EncryptionError::InvalidKeyLen { key: KeyKind::AuthSecret, expected: 16, actual: 12 }
        );
    }

    #[test]
    fn test_malformed_base64_rejected() {
        let r = receiver(9);
        let err = encrypt("not*base64!", &r.auth_secret_b64, b"x").unwrap_err();
        assert_eq!(err, EncryptionError::InvalidEncoding { key: KeyKind::ClientPublicKey });
    }

    #[test]
    fn test_point_not_on_curve_rejected() {
        let r = receiver(10);
        let mut bogus = [0x01u8; 65];
        bogus[0] = 0x04;
        let err = encrypt(&b64url_encode(bogus), &r.auth_secret_b64, b"x").unwrap_err();
        assert_eq!(err, EncryptionError::InvalidPoint { key: KeyKind::ClientPublicKey });
    }

    #[test]
    fn test_padded_base64_accepted() {
        let r = receiver(11);
        let padded = format!("{}=", r.public_key_b64);
        let result = encrypt(&padded, &format!("{}==", r.auth_secret_b64), b"pad").unwrap();
        assert_eq!(open(&r, &result).unwrap(), b"pad");
    }

    // Round-trip law over arbitrary subscribers and payloads
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_round_trip(seed in any::<u64>(), plaintext in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let r = receiver(seed);
            let result = encrypt(&r.public_key_b64, &r.auth_secret_b64, &plaintext).unwrap();
            prop_assert_eq!(open(&r, &result).unwrap(), plaintext);
        }
    }
}
