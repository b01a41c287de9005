//! Itinerary repository: CRUD, status workflow and the proximity query.
//!
//! New records are prepended, so listings come back most-recent-first
//! without a sort. No read-modify-write atomicity exists across two
//! repository calls; single-writer-at-a-time is assumed by construction.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use bh_core::borghi::{normalize_slug, BorgoIndex};
use bh_core::error::Result;
use bh_core::geo::haversine_km;
use bh_core::models::{
    FinalTips, Itinerary, ItineraryPatch, ItineraryStatus, NearbyItinerary,
};
use bh_core::ports::{collections, BlobStore, RecordStore};

use crate::collection;

pub struct ItineraryRepo {
    records: Arc<dyn RecordStore>,
    images: Arc<dyn BlobStore>,
    borghi: BorgoIndex,
}

impl ItineraryRepo {
    pub fn new(records: Arc<dyn RecordStore>, images: Arc<dyn BlobStore>) -> Self {
        Self::with_borgo_index(records, images, BorgoIndex::default())
    }

    /// Constructor with an explicit coordinate index, so tests control
    /// the geography behind `list_published_near`.
    pub fn with_borgo_index(
        records: Arc<dyn RecordStore>,
        images: Arc<dyn BlobStore>,
        borghi: BorgoIndex,
    ) -> Self {
        Self { records, images, borghi }
    }

    async fn load(&self) -> Vec<Itinerary> {
        collection::load(self.records.as_ref(), collections::ITINERARIES).await
    }

    async fn save(&self, items: &[Itinerary]) -> Result<()> {
        collection::save(self.records.as_ref(), collections::ITINERARIES, items).await
    }

    /// Itineraries owned by `user_id`, optionally restricted to one
    /// status, in stored (most-recent-first) order.
    pub async fn list_mine(
        &self,
        user_id: &str,
        status: Option<ItineraryStatus>,
    ) -> Vec<Itinerary> {
        self.load()
            .await
            .into_iter()
            .filter(|i| i.user_id == user_id)
            .filter(|i| status.map_or(true, |s| i.status == s))
            .collect()
    }

    /// Allocates an empty draft for the given owner and prepends it to
    /// the collection.
    pub async fn create_draft(&self, user_id: &str) -> Result<Itinerary> {
        let now = Utc::now();
        let itinerary = Itinerary {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            status: ItineraryStatus::Draft,
            title: String::new(),
            main_borgo_slug: String::new(),
            date_of_trip: String::new(),
            duration: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            stops: Vec::new(),
            final_tips: FinalTips::default(),
            gallery_keys: Vec::new(),
            cover_url: String::new(),
            created_at: now,
            updated_at: now,
        };

        let mut items = self.load().await;
        items.insert(0, itinerary.clone());
        self.save(&items).await?;
        Ok(itinerary)
    }

    pub async fn get(&self, id: Uuid) -> Option<Itinerary> {
        self.load().await.into_iter().find(|i| i.id == id)
    }

    /// Shallow merge-patch. Normalizes `main_borgo_slug` if present in
    /// the patch and always bumps `updated_at`. Returns `Ok(None)` for
    /// an unknown id — a miss is not an error here.
    pub async fn update(&self, id: Uuid, patch: ItineraryPatch) -> Result<Option<Itinerary>> {
        let mut items = self.load().await;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        if let Some(status) = patch.status {
            item.status = status;
        }
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(slug) = patch.main_borgo_slug {
            item.main_borgo_slug = normalize_slug(&slug);
        }
        if let Some(date_of_trip) = patch.date_of_trip {
            item.date_of_trip = date_of_trip;
        }
        if let Some(duration) = patch.duration {
            item.duration = duration;
        }
        if let Some(tags) = patch.tags {
            item.tags = tags;
        }
        if let Some(summary) = patch.summary {
            item.summary = summary;
        }
        if let Some(stops) = patch.stops {
            item.stops = stops;
        }
        if let Some(final_tips) = patch.final_tips {
            item.final_tips = final_tips;
        }
        if let Some(gallery_keys) = patch.gallery_keys {
            item.gallery_keys = gallery_keys;
        }
        if let Some(cover_url) = patch.cover_url {
            item.cover_url = cover_url;
        }
        item.updated_at = Utc::now();

        let updated = item.clone();
        self.save(&items).await?;
        Ok(Some(updated))
    }

    /// Convenience patch: `draft → in_review`. No transition validation
    /// is performed beyond what the caller already did.
    pub async fn submit_for_review(&self, id: Uuid) -> Result<Option<Itinerary>> {
        self.update(
            id,
            ItineraryPatch { status: Some(ItineraryStatus::InReview), ..Default::default() },
        )
        .await
    }

    /// Convenience patch: `in_review → published`.
    pub async fn publish(&self, id: Uuid) -> Result<Option<Itinerary>> {
        self.update(
            id,
            ItineraryPatch { status: Some(ItineraryStatus::Published), ..Default::default() },
        )
        .await
    }

    /// Idempotent removal. Gallery blobs are NOT touched here; callers
    /// that want cleanup go through `remove_gallery_image` first.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let mut items = self.load().await;
        items.retain(|i| i.id != id);
        self.save(&items).await
    }

    /// Stores an image in the image keyspace and appends its key to the
    /// itinerary's gallery. Returns `Ok(None)` for an unknown itinerary.
    pub async fn add_gallery_image(&self, id: Uuid, data: Bytes) -> Result<Option<String>> {
        let mut items = self.load().await;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        let key = self.images.put(data).await?;
        if !item.gallery_keys.contains(&key) {
            item.gallery_keys.push(key.clone());
        }
        item.updated_at = Utc::now();
        self.save(&items).await?;
        Ok(Some(key))
    }

    /// Drops a key from the gallery and best-effort deletes the blob;
    /// blob-deletion failures never fail the record update.
    pub async fn remove_gallery_image(&self, id: Uuid, key: &str) -> Result<Option<Itinerary>> {
        let mut items = self.load().await;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        item.gallery_keys.retain(|k| k != key);
        item.updated_at = Utc::now();
        let updated = item.clone();
        self.save(&items).await?;

        // Content-addressed keys may be shared across galleries; only
        // delete once no surviving itinerary references this one.
        let still_referenced = items
            .iter()
            .any(|i| i.gallery_keys.iter().any(|k| k == key));
        if !still_referenced {
            if let Err(err) = self.images.delete(key).await {
                warn!(%key, %err, "gallery blob cleanup failed");
            }
        }
        Ok(Some(updated))
    }

    /// Published itineraries around a borgo.
    ///
    /// With a positive radius and known target coordinates, candidates
    /// are kept when the great-circle distance between the target borgo
    /// and the candidate's borgo is within `radius_km`; candidates whose
    /// borgo has no known coordinates are silently skipped. Otherwise
    /// the query degrades to exact slug equality with distance 0.
    ///
    /// Sorted by ascending distance, then most recently updated first.
    pub async fn list_published_near(
        &self,
        borgo_slug: &str,
        radius_km: f64,
    ) -> Vec<NearbyItinerary> {
        let target = normalize_slug(borgo_slug);
        let published = self
            .load()
            .await
            .into_iter()
            .filter(|i| i.status == ItineraryStatus::Published);

        let mut hits: Vec<NearbyItinerary> = match self.borghi.coords(&target) {
            Some(origin) if radius_km > 0.0 => published
                .filter_map(|itinerary| {
                    let coord = self.borghi.coords(&itinerary.main_borgo_slug)?;
                    let distance_km = haversine_km(origin, coord);
                    (distance_km <= radius_km)
                        .then_some(NearbyItinerary { itinerary, distance_km })
                })
                .collect(),
            _ => published
                .filter(|i| i.main_borgo_slug == target)
                .map(|itinerary| NearbyItinerary { itinerary, distance_km: 0.0 })
                .collect(),
        };

        hits.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| b.itinerary.updated_at.cmp(&a.itinerary.updated_at))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bh_store_memory::{MemoryBlobStore, MemoryRecordStore};

    fn repo() -> ItineraryRepo {
        ItineraryRepo::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    #[tokio::test]
    async fn new_drafts_are_prepended() {
        let repo = repo();
        let first = repo.create_draft("u1").await.unwrap();
        let second = repo.create_draft("u1").await.unwrap();

        let mine = repo.list_mine("u1", None).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);
    }

    #[tokio::test]
    async fn list_mine_filters_by_owner_and_status() {
        let repo = repo();
        let mine = repo.create_draft("u1").await.unwrap();
        repo.create_draft("u2").await.unwrap();
        repo.publish(mine.id).await.unwrap();

        assert_eq!(repo.list_mine("u1", None).await.len(), 1);
        assert!(repo
            .list_mine("u1", Some(ItineraryStatus::Draft))
            .await
            .is_empty());
        assert_eq!(
            repo.list_mine("u1", Some(ItineraryStatus::Published)).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn update_on_unknown_id_is_none() {
        let repo = repo();
        let result = repo
            .update(Uuid::now_v7(), ItineraryPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let repo = repo();
        let draft = repo.create_draft("u1").await.unwrap();
        repo.remove(draft.id).await.unwrap();
        repo.remove(draft.id).await.unwrap();
        assert!(repo.get(draft.id).await.is_none());
    }

    #[tokio::test]
    async fn gallery_image_round_trip() {
        let repo = repo();
        let draft = repo.create_draft("u1").await.unwrap();

        let key = repo
            .add_gallery_image(draft.id, Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap()
            .expect("itinerary exists");
        let stored = repo.get(draft.id).await.unwrap();
        assert_eq!(stored.gallery_keys, vec![key.clone()]);

        let updated = repo
            .remove_gallery_image(draft.id, &key)
            .await
            .unwrap()
            .expect("itinerary exists");
        assert!(updated.gallery_keys.is_empty());
    }

    #[tokio::test]
    async fn shared_gallery_image_outlives_one_gallery() {
        let records = Arc::new(MemoryRecordStore::new());
        let images = Arc::new(MemoryBlobStore::new());
        let repo = ItineraryRepo::new(records, images.clone());

        let a = repo.create_draft("u1").await.unwrap();
        let b = repo.create_draft("u2").await.unwrap();
        let key = repo
            .add_gallery_image(a.id, Bytes::from_static(b"same jpeg"))
            .await
            .unwrap()
            .unwrap();
        let key_b = repo
            .add_gallery_image(b.id, Bytes::from_static(b"same jpeg"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(key, key_b);

        repo.remove_gallery_image(a.id, &key).await.unwrap();
        assert!(images.get(&key).await.unwrap().is_some());

        repo.remove_gallery_image(b.id, &key).await.unwrap();
        assert!(images.get(&key).await.unwrap().is_none());
    }
}
