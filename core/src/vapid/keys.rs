// ## src/vapid/keys.rs

//! vapid/keys.rs
//! VAPID key pair generation.
//!
//! The private key is stored as the raw 32-byte scalar (not SEC1 or PKCS#8
//! DER); the public key as the 65-byte uncompressed point. Both base64url.

use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::models::VapidDetails;
use crate::utils::b64url_encode;

/// Freshly generated VAPID key pair, base64url-encoded.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VapidKeys {
    public_key: String,
    private_key: String,
}

impl VapidKeys {
    /// Uncompressed public key (65 bytes decoded). Browsers use this as the
    /// `applicationServerKey`.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Raw private scalar (32 bytes decoded).
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Bind the pair to a subject.
    pub fn into_details(self, subject: impl Into<String>) -> VapidDetails {
        VapidDetails::new(subject, self.public_key.clone(), self.private_key.clone())
    }
}

impl std::fmt::Debug for VapidKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidKeys")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generate a VAPID key pair from the operating system RNG.
pub fn generate_vapid_keys() -> VapidKeys {
    generate_vapid_keys_with_rng(&mut OsRng)
}

/// Generate a VAPID key pair from `rng`.
pub fn generate_vapid_keys_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> VapidKeys {
    let signing_key = SigningKey::random(rng);

    // SEC1 uncompressed public key (65 bytes: 0x04 || x || y)
    let public_point = signing_key.verifying_key().to_encoded_point(false);

    VapidKeys {
        public_key: b64url_encode(public_point.as_bytes()),
        private_key: b64url_encode(signing_key.to_bytes()),
    }
}
