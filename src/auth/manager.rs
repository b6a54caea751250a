//! API key lifecycle: issue, validate, list, revoke.

use std::sync::Arc;

use crate::auth::{generate_api_key, KeyHasher};
use crate::domain::{validate_name, CredentialRecord};
use crate::error::KeyResult;
use crate::storage::KeyStore;

/// Issues and validates API keys against a [`KeyStore`].
///
/// Holds no per-request state; clones share the same store.
#[derive(Clone)]
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    hasher: KeyHasher,
}

impl KeyManager {
    /// Create a manager over the given store and hasher.
    pub fn new(store: Arc<dyn KeyStore>, hasher: KeyHasher) -> Self {
        Self { store, hasher }
    }

    /// Issue a new key for `name`, replacing any key previously issued to it.
    ///
    /// The returned raw key is not retrievable afterwards.
    pub async fn issue(&self, name: &str) -> KeyResult<String> {
        validate_name(name)?;

        let key = generate_api_key();
        let hash = self.hasher.hash(&key);
        self.store.upsert_hash(name, &hash).await?;

        tracing::info!(name = %name, "API key issued");
        Ok(key)
    }

    /// Check a presented key. Storage errors propagate; every other
    /// non-match is `Ok(false)`.
    pub async fn validate(&self, key: &str) -> KeyResult<bool> {
        let hash = self.hasher.hash(key);
        let stored = self.store.find_hash(&hash).await?;

        let valid = stored.as_deref() == Some(hash.as_str());
        if !valid {
            tracing::debug!("API key did not match any stored hash");
        }
        Ok(valid)
    }

    /// All issued key records, ordered by name.
    pub async fn list(&self) -> KeyResult<Vec<CredentialRecord>> {
        self.store.list_all().await
    }

    /// Revoke the key issued to `name`. Unknown names are a no-op.
    pub async fn revoke(&self, name: &str) -> KeyResult<()> {
        self.store.delete(name).await?;
        tracing::info!(name = %name, "API key revoked");
        Ok(())
    }

    /// Check that the underlying store is reachable.
    pub async fn ping(&self) -> KeyResult<()> {
        self.store.ping().await
    }
}
