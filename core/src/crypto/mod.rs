//! crypto/mod.rs
//! Web Push payload encryption engine ("aesgcm" content encoding).

pub mod types;
pub mod kdf;
pub mod aead;
pub mod encryptor;

pub use types::*;
pub use kdf::*;
pub use aead::*;
pub use encryptor::*;
