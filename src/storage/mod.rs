//! Storage layer for Keygate.
//!
//! Key records are persisted behind the [`KeyStore`] trait. The reference
//! backend is SQLite via SQLx; an in-memory backend serves tests and
//! throwaway deployments.

use async_trait::async_trait;

use crate::domain::CredentialRecord;
use crate::error::KeyResult;

mod memory;
mod models;
mod repository;

pub use memory::MemoryKeyStore;
pub use repository::SqliteKeyStore;

/// Persistence for `(name, hash)` key records.
///
/// Every method may suspend on I/O and fails only on storage errors.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Insert or overwrite the record for `name`, stamping it with the current time.
    async fn upsert_hash(&self, name: &str, hash: &str) -> KeyResult<()>;

    /// Return the stored hash equal to `candidate`, if any.
    async fn find_hash(&self, candidate: &str) -> KeyResult<Option<String>>;

    /// All records ordered by name.
    async fn list_all(&self) -> KeyResult<Vec<CredentialRecord>>;

    /// Remove the record for `name`. Unknown names are a no-op.
    async fn delete(&self, name: &str) -> KeyResult<()>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> KeyResult<()> {
        Ok(())
    }
}
