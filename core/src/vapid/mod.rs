//! vapid/mod.rs
//! VAPID application-server identification: input validation, ES256 token
//! signing and key generation.

pub mod validate;
pub mod token;
pub mod keys;

pub use validate::*;
pub use token::*;
pub use keys::*;
