//! # bh-store-local
//!
//! File-backed implementations of the `RecordStore` and `BlobStore`
//! ports: one JSON document per collection (the browser local-storage
//! analogue) and a content-addressed, directory-sharded blob tree.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::warn;

use bh_core::error::{AppError, Result};
use bh_core::ports::{BlobStore, RecordStore};

fn storage_err(err: std::io::Error) -> AppError {
    AppError::StorageUnavailable(err.to_string())
}

/// Persists each collection as `<root>/<collection>.json`, an ordered
/// JSON array. Reads are fail-soft; writes are a single `fs::write`.
pub struct JsonFileRecordStore {
    root: PathBuf,
}

impl JsonFileRecordStore {
    /// Open-or-create: the data directory is created if missing, and
    /// calling this twice on the same root is harmless.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(storage_err)?;
        Ok(Self { root })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn read_all(&self, collection: &str) -> Vec<Value> {
        let path = self.collection_path(collection);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(collection, %err, "collection unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(collection, %err, "collection corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    async fn write_all(&self, collection: &str, records: Vec<Value>) -> Result<()> {
        let payload = serde_json::to_vec(&records)?;
        fs::write(self.collection_path(collection), payload)
            .await
            .map_err(storage_err)
    }
}

/// Saves blobs under their SHA-256 hash with two-level directory
/// sharding ("ab/cd/ab cdef..."), which also deduplicates identical
/// payloads.
pub struct LocalBlobStore {
    root: PathBuf,
    /// Public URL prefix for playback handles (e.g. "/static/media").
    url_prefix: String,
}

impl LocalBlobStore {
    pub async fn open(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(storage_err)?;
        Ok(Self { root, url_prefix: url_prefix.into() })
    }

    fn sharded_path(&self, key: &str) -> Option<PathBuf> {
        // Keys are 64-char sha256 hex; anything shorter cannot be ours.
        if key.len() < 4 || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut path = self.root.clone();
        path.push(&key[0..2]);
        path.push(&key[2..4]);
        path.push(key);
        Some(path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, data: Bytes) -> Result<String> {
        let key = hex::encode(Sha256::digest(&data));
        let target = self
            .sharded_path(&key)
            .expect("sha256 hex key is always shardable");
        let parent = target.parent().expect("sharded path has a parent");
        fs::create_dir_all(parent).await.map_err(storage_err)?;
        if !exists(&target).await {
            fs::write(&target, &data).await.map_err(storage_err)?;
        }
        Ok(key)
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let Some(path) = self.sharded_path(key) else {
            return Ok(None);
        };
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_err(err)),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let Some(path) = self.sharded_path(key) else {
            return Ok(());
        };
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(err)),
        }
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(storage_err(err)),
        }
        fs::create_dir_all(&self.root).await.map_err(storage_err)
    }

    fn url(&self, key: &str) -> String {
        if key.len() < 4 {
            return format!("{}/{key}", self.url_prefix);
        }
        format!("{}/{}/{}/{key}", self.url_prefix, &key[0..2], &key[2..4])
    }
}

async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}
