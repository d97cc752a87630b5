use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a SHA-256 digest rendered as lowercase hex
pub const SHA256_HEX_LEN: usize = 64;

/// Compute SHA256 hash of input bytes
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Compute SHA256 hash of input bytes as a lowercase hex string
pub fn sha256_hex(input: &[u8]) -> String {
    hex::encode(sha256(input))
}

/// One-way hasher for user identifiers
///
/// Produces `hex(SHA-256(salt || identifier))`. The salt is fixed at construction
/// and never exposed again, so equal identifiers map to equal tokens for the
/// lifetime of the process while the original value cannot be recovered.
#[derive(Clone)]
pub struct SaltedHasher {
    salt: Vec<u8>,
}

impl SaltedHasher {
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self {
            salt: salt.as_ref().to_vec(),
        }
    }

    /// Hash an identifier into a 64-character lowercase hex token
    pub fn hash_identifier(&self, identifier: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(identifier.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for SaltedHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedHasher")
            .field("salt", &"<redacted>")
            .finish()
    }
}
