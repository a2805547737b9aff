//! Shortlink Module
//!
//! Identifier encoding, URL fingerprints, the storage key schema and the
//! link store built on top of them.

pub mod base62;
mod detail;
mod fingerprint;
pub mod keys;
mod store;


pub use detail::{CachedToken, LinkDetail};
pub use fingerprint::{fingerprint, FINGERPRINT_LEN};
pub use store::LinkStore;
