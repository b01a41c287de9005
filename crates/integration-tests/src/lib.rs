//! Shared fixtures for the integration tests: repositories wired to the
//! in-memory store adapters, plus input builders.

use std::sync::Arc;

use bytes::Bytes;

use bh_core::borghi::BorgoIndex;
use bh_core::models::{NewVideo, VideoUpload};
use bh_repos::{ChatRepo, ItineraryRepo, VideoRepo};
use bh_store_memory::{MemoryBlobStore, MemoryRecordStore};

pub fn itinerary_repo() -> ItineraryRepo {
    ItineraryRepo::new(
        Arc::new(MemoryRecordStore::new()),
        Arc::new(MemoryBlobStore::new()),
    )
}

pub fn itinerary_repo_with_index(borghi: BorgoIndex) -> ItineraryRepo {
    ItineraryRepo::with_borgo_index(
        Arc::new(MemoryRecordStore::new()),
        Arc::new(MemoryBlobStore::new()),
        borghi,
    )
}

/// Video repository plus its backing stores, for tests that poke at the
/// storage layer directly (migration, blob cleanup).
pub fn video_repo() -> (Arc<MemoryRecordStore>, Arc<MemoryBlobStore>, VideoRepo) {
    let records = Arc::new(MemoryRecordStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let repo = VideoRepo::new(records.clone(), blobs.clone());
    (records, blobs, repo)
}

pub fn chat_repo() -> ChatRepo {
    ChatRepo::new(Arc::new(MemoryRecordStore::new()))
}

pub fn link_video(owner: &str, url: &str) -> NewVideo {
    NewVideo {
        owner_id: owner.to_string(),
        title: "Tramonto dalle Dolomiti Lucane".to_string(),
        description: String::new(),
        borgo_slug: "castelmezzano".to_string(),
        poi_id: None,
        category: "esperienze".to_string(),
        thumbnail: None,
        tags: vec!["borghi".to_string()],
        upload: VideoUpload::Link(url.to_string()),
    }
}

pub fn file_video(owner: &str, payload: &'static [u8]) -> NewVideo {
    NewVideo {
        owner_id: owner.to_string(),
        title: "Giro del centro storico".to_string(),
        description: String::new(),
        borgo_slug: "viggiano".to_string(),
        poi_id: None,
        category: "cultura".to_string(),
        thumbnail: None,
        tags: Vec::new(),
        upload: VideoUpload::File(Bytes::from_static(payload)),
    }
}
