//! request/mod.rs
//! Request assembly (auth dispatch, headers, TTL) and response
//! classification.

pub mod options;
pub mod builder;
pub mod outcome;

pub use options::*;
pub use builder::*;
pub use outcome::*;
