//! API key generation and hashing.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Number of random bytes in a raw API key.
pub const KEY_BYTES: usize = 32;

/// Generate a new raw API key.
///
/// 32 bytes from the OS CSPRNG, base64 encoded. Uniqueness against
/// existing keys is not checked.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Derives the stored form of an API key from a process-wide salt.
#[derive(Clone)]
pub struct KeyHasher {
    salt: String,
}

impl std::fmt::Debug for KeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHasher").finish_non_exhaustive()
    }
}

impl KeyHasher {
    /// Create a hasher with the given secret salt.
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Hash a raw API key: base64(SHA-256(salt || key)).
    pub fn hash(&self, key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(key.as_bytes());
        STANDARD.encode(hasher.finalize())
    }
}
