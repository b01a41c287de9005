//! # bh-store-memory
//!
//! In-memory implementations of the `RecordStore` and `BlobStore` ports.
//! Used as the substitutable fake in tests and as a throwaway dev
//! backend. State lives for the process lifetime only.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};

use bh_core::error::Result;
use bh_core::ports::{BlobStore, RecordStore};

/// Whole-collection JSON storage backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn read_all(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn write_all(&self, collection: &str, records: Vec<Value>) -> Result<()> {
        self.collections.insert(collection.to_string(), records);
        Ok(())
    }
}

/// Content-addressed blob storage backed by a concurrent map.
/// Keys are SHA-256 hex of the payload, matching the local adapter.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, data: Bytes) -> Result<String> {
        let key = hex::encode(Sha256::digest(&data));
        self.blobs.entry(key.clone()).or_insert(data);
        Ok(key)
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.blobs.get(key).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blobs.clear();
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unwritten_collection_reads_empty() {
        let store = MemoryRecordStore::new();
        assert!(store.read_all("itineraries").await.is_empty());
    }

    #[tokio::test]
    async fn write_all_replaces_the_collection() {
        let store = MemoryRecordStore::new();
        store
            .write_all("itineraries", vec![json!({"id": 1}), json!({"id": 2})])
            .await
            .unwrap();
        store.write_all("itineraries", vec![json!({"id": 3})]).await.unwrap();

        let records = store.read_all("itineraries").await;
        assert_eq!(records, vec![json!({"id": 3})]);
    }

    #[tokio::test]
    async fn blob_round_trip_is_byte_identical() {
        let store = MemoryBlobStore::new();
        let payload = Bytes::from_static(b"\x00\x01binary payload\xff");
        let key = store.put(payload.clone()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(payload));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryBlobStore::new();
        let key = store.put(Bytes::from_static(b"x")).await.unwrap();
        store.delete(&key).await.unwrap();
        store.delete(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_key_is_none_not_error() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("deadbeef").await.unwrap(), None);
    }
}
