//! Hashing primitives shared by the journey pipeline.
//!
//! The anonymization service uses [`SaltedHasher`] to replace user identifiers
//! with a stable, one-way token before anything leaves the ingestion boundary.

pub mod hash;

pub use hash::{sha256, sha256_hex, SaltedHasher, SHA256_HEX_LEN};
