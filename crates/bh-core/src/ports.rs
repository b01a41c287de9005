//! # Core Traits (Ports)
//!
//! Storage access is injected behind these traits at repository
//! construction time, so tests can substitute an in-memory fake and no
//! hidden module-level storage handle exists.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::Result;

/// Well-known collection keys used by the repositories.
pub mod collections {
    pub const ITINERARIES: &str = "itineraries";
    pub const VIDEOS: &str = "videos";
    /// Pre-rename video collection; copied forward once if present.
    pub const VIDEOS_LEGACY: &str = "creator-videos";
    pub const CHAT_THREADS: &str = "chat-threads";
}

/// Generic persistence of a named collection as an ordered sequence of
/// JSON records. Full-read/full-write semantics only; query logic lives
/// in the repositories above this port.
///
/// No ordering is guaranteed across concurrent writers — last writer
/// wins. Single-writer-at-a-time is assumed by construction.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the stored records, or an empty sequence if the collection
    /// has never been written. Corrupt or missing underlying storage is
    /// tolerated by returning empty (fail-soft, locally-cached data).
    async fn read_all(&self, collection: &str) -> Vec<Value>;

    /// Overwrites the entire collection in a single underlying write.
    async fn write_all(&self, collection: &str, records: Vec<Value>) -> Result<()>;
}

/// Keyed storage of binary objects (images, videos) outside the record
/// collections, so large media never bloats record reads and writes.
///
/// Each keyspace (itinerary images, creator videos) is a separate
/// instance. Initialization is open-or-create and idempotent.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the blob and returns its opaque key. Fails with
    /// `StorageUnavailable` if the underlying engine is down.
    async fn put(&self, data: Bytes) -> Result<String>;

    /// Returns `Ok(None)` for missing keys; a miss is never an error.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Idempotent; deleting a non-existent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes all entries (maintenance operation).
    async fn clear(&self) -> Result<()>;

    /// Returns a playback/browse handle for the given key. Purely
    /// computed; does not check that the key exists.
    fn url(&self, key: &str) -> String;
}
