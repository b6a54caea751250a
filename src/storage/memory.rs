//! In-memory key store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::CredentialRecord;
use crate::error::KeyResult;
use crate::storage::KeyStore;

#[derive(Default)]
struct Inner {
    next_id: i64,
    records: BTreeMap<String, CredentialRecord>,
}

/// Key store holding records in process memory, keyed by name.
#[derive(Clone, Default)]
pub struct MemoryKeyStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn upsert_hash(&self, name: &str, hash: &str) -> KeyResult<()> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        if let Some(record) = inner.records.get_mut(name) {
            record.hash = hash.to_string();
            record.created_at = now;
            return Ok(());
        }

        inner.next_id += 1;
        let record = CredentialRecord {
            id: inner.next_id,
            name: name.to_string(),
            hash: hash.to_string(),
            created_at: now,
        };
        inner.records.insert(name.to_string(), record);
        Ok(())
    }

    async fn find_hash(&self, candidate: &str) -> KeyResult<Option<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .find(|r| r.hash == candidate)
            .map(|r| r.hash.clone()))
    }

    async fn list_all(&self) -> KeyResult<Vec<CredentialRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> KeyResult<()> {
        self.inner.write().await.records.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_keeps_one_record_per_name() {
        let store = MemoryKeyStore::new();

        store.upsert_hash("svc1", "hash-1").await.unwrap();
        store.upsert_hash("svc1", "hash-2").await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].hash, "hash-2");
        assert!(store.find_hash("hash-1").await.unwrap().is_none());
        assert_eq!(
            store.find_hash("hash-2").await.unwrap().as_deref(),
            Some("hash-2")
        );
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryKeyStore::new();

        store.upsert_hash("a", "h-a").await.unwrap();
        store.delete("a").await.unwrap();
        store.upsert_hash("b", "h-b").await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
    }

    #[tokio::test]
    async fn test_list_sorted_and_delete_unknown() {
        let store = MemoryKeyStore::new();

        store.upsert_hash("zulu", "h-z").await.unwrap();
        store.upsert_hash("alpha", "h-a").await.unwrap();

        let names: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zulu"]);

        assert!(store.delete("missing").await.is_ok());
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }
}
