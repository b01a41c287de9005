//! Creator video repository: CRUD, status workflow, platform
//! classification, and the bridge into the video blob keyspace.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use url::Url;
use uuid::Uuid;

use bh_core::borghi::normalize_slug;
use bh_core::error::{AppError, Result};
use bh_core::models::{
    NewVideo, Platform, Video, VideoPatch, VideoSource, VideoStatus, VideoUpload,
};
use bh_core::ports::{collections, BlobStore, RecordStore};

use crate::collection;

/// Classifies a link by hostname substring. Unknown hosts are `altro`.
pub fn detect_platform(url: &str) -> Platform {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();
    if host.contains("instagram.com") {
        Platform::Instagram
    } else if host.contains("tiktok.com") {
        Platform::Tiktok
    } else if host.contains("youtube.com") || host.contains("youtu.be") {
        Platform::Youtube
    } else {
        Platform::Altro
    }
}

/// Extracts the video id from a youtube URL: the `v` query parameter on
/// the long-form host, the first path segment on `youtu.be`.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host.contains("youtu.be") {
        parsed
            .path_segments()?
            .find(|segment| !segment.is_empty())
            .map(str::to_string)
    } else if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(name, _)| name == "v")
            .map(|(_, value)| value.into_owned())
    } else {
        None
    }
}

/// Default thumbnail for a youtube link when none was supplied.
pub fn youtube_thumbnail(url: &str) -> Option<String> {
    youtube_video_id(url).map(|id| format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"))
}

/// Public-URL validity check: parseable, http or https scheme.
fn validate_public_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|_| AppError::InvalidUrl(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(AppError::InvalidUrl(trimmed.to_string())),
    }
}

pub struct VideoRepo {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
}

impl VideoRepo {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { records, blobs }
    }

    /// Reads the video collection, copying the pre-rename collection
    /// forward once if the current one is still empty. No further
    /// schema versioning exists.
    async fn load(&self) -> Vec<Video> {
        let videos: Vec<Video> =
            collection::load(self.records.as_ref(), collections::VIDEOS).await;
        if !videos.is_empty() {
            return videos;
        }
        let legacy: Vec<Video> =
            collection::load(self.records.as_ref(), collections::VIDEOS_LEGACY).await;
        if legacy.is_empty() {
            return videos;
        }
        if let Err(err) = self.save(&legacy).await {
            warn!(%err, "legacy video collection migration failed");
            return Vec::new();
        }
        // Clear the old key so the migration runs exactly once; leaving
        // it populated would resurrect removed videos whenever the
        // current collection empties out again.
        if let Err(err) = self
            .records
            .write_all(collections::VIDEOS_LEGACY, Vec::new())
            .await
        {
            warn!(%err, "failed to clear legacy video collection");
        }
        legacy
    }

    async fn save(&self, videos: &[Video]) -> Result<()> {
        collection::save(self.records.as_ref(), collections::VIDEOS, videos).await
    }

    /// Builds the record for a new video, moving uploaded bytes into the
    /// blob keyspace or validating/classifying an external link.
    async fn build(&self, input: NewVideo, status: VideoStatus) -> Result<Video> {
        let now = Utc::now();
        let (source, video_key, local_url, url, platform, thumbnail) = match input.upload {
            VideoUpload::File(data) => {
                let key = self.blobs.put(data).await?;
                let local_url = self.blobs.url(&key);
                (VideoSource::File, Some(key), Some(local_url), None, None, input.thumbnail)
            }
            VideoUpload::Link(raw) => {
                let url = validate_public_url(&raw)?;
                let platform = detect_platform(&url);
                let thumbnail = input.thumbnail.or_else(|| {
                    (platform == Platform::Youtube)
                        .then(|| youtube_thumbnail(&url))
                        .flatten()
                });
                (VideoSource::Link, None, None, Some(url), Some(platform), thumbnail)
            }
        };

        Ok(Video {
            id: Uuid::now_v7(),
            owner_id: input.owner_id,
            title: input.title,
            description: input.description,
            borgo_slug: normalize_slug(&input.borgo_slug),
            poi_id: input.poi_id,
            category: input.category,
            status,
            source,
            video_key,
            local_url,
            url,
            platform,
            thumbnail,
            tags: input.tags,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
            published_at: (status == VideoStatus::Published).then_some(now),
            scheduled_at: None,
        })
    }

    async fn insert(&self, video: Video) -> Result<Video> {
        let mut videos = self.load().await;
        videos.insert(0, video.clone());
        self.save(&videos).await?;
        Ok(video)
    }

    /// Creates a draft. Link uploads are validated and classified here;
    /// file uploads go into the blob keyspace.
    pub async fn create_draft(&self, input: NewVideo) -> Result<Video> {
        let video = self.build(input, VideoStatus::Draft).await?;
        self.insert(video).await
    }

    /// "Quick external" path: same validation as `create_draft`, but
    /// requires a borgo and category and publishes immediately,
    /// bypassing draft/review.
    pub async fn add_external_published(&self, input: NewVideo) -> Result<Video> {
        if input.borgo_slug.trim().is_empty() {
            return Err(AppError::MissingField("borgo_slug"));
        }
        if input.category.trim().is_empty() {
            return Err(AppError::MissingField("category"));
        }
        let video = self.build(input, VideoStatus::Published).await?;
        self.insert(video).await
    }

    pub async fn get(&self, id: Uuid) -> Option<Video> {
        self.load().await.into_iter().find(|v| v.id == id)
    }

    pub async fn list_by_owner(&self, owner_id: &str) -> Vec<Video> {
        let mut videos: Vec<Video> = self
            .load()
            .await
            .into_iter()
            .filter(|v| v.owner_id == owner_id)
            .collect();
        sort_by_resolved_timestamp(&mut videos);
        videos
    }

    pub async fn list_published_by_borgo(&self, slug: &str) -> Vec<Video> {
        let slug = normalize_slug(slug);
        let mut videos: Vec<Video> = self
            .load()
            .await
            .into_iter()
            .filter(|v| v.status == VideoStatus::Published && v.borgo_slug == slug)
            .collect();
        sort_by_resolved_timestamp(&mut videos);
        videos
    }

    pub async fn list_published_by_poi(&self, slug: &str, poi_id: &str) -> Vec<Video> {
        let slug = normalize_slug(slug);
        let mut videos: Vec<Video> = self
            .load()
            .await
            .into_iter()
            .filter(|v| {
                v.status == VideoStatus::Published
                    && v.borgo_slug == slug
                    && v.poi_id.as_deref() == Some(poi_id)
            })
            .collect();
        sort_by_resolved_timestamp(&mut videos);
        videos
    }

    /// Shallow merge-patch; `Ok(None)` for unknown ids.
    pub async fn update(&self, id: Uuid, patch: VideoPatch) -> Result<Option<Video>> {
        let mut videos = self.load().await;
        let Some(video) = videos.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };

        if let Some(status) = patch.status {
            video.status = status;
        }
        if let Some(title) = patch.title {
            video.title = title;
        }
        if let Some(description) = patch.description {
            video.description = description;
        }
        if let Some(slug) = patch.borgo_slug {
            video.borgo_slug = normalize_slug(&slug);
        }
        if let Some(poi_id) = patch.poi_id {
            video.poi_id = Some(poi_id);
        }
        if let Some(category) = patch.category {
            video.category = category;
        }
        if let Some(url) = patch.url {
            video.url = Some(url);
        }
        if let Some(thumbnail) = patch.thumbnail {
            video.thumbnail = Some(thumbnail);
        }
        if let Some(tags) = patch.tags {
            video.tags = tags;
        }
        if let Some(views) = patch.views {
            video.views = views;
        }
        if let Some(likes) = patch.likes {
            video.likes = likes;
        }
        if let Some(published_at) = patch.published_at {
            video.published_at = Some(published_at);
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            video.scheduled_at = Some(scheduled_at);
        }
        video.updated_at = Utc::now();

        let updated = video.clone();
        self.save(&videos).await?;
        Ok(Some(updated))
    }

    /// Removes the record, then best-effort deletes the associated blob
    /// for file-sourced videos. Blob-deletion errors are swallowed so
    /// record removal always succeeds once requested.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let mut videos = self.load().await;
        let removed = videos.iter().find(|v| v.id == id).cloned();
        videos.retain(|v| v.id != id);
        self.save(&videos).await?;

        if let Some(video) = removed {
            if video.source == VideoSource::File {
                if let Some(key) = video.video_key {
                    // Keys are content-addressed, so identical uploads
                    // share a blob; only delete once no surviving
                    // record references it.
                    let still_referenced = videos
                        .iter()
                        .any(|v| v.video_key.as_deref() == Some(key.as_str()));
                    if !still_referenced {
                        if let Err(err) = self.blobs.delete(&key).await {
                            warn!(%key, %err, "video blob cleanup failed");
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Patches status to `scheduled` at the given time (or now).
    pub async fn schedule(&self, id: Uuid, when: Option<DateTime<Utc>>) -> Result<Option<Video>> {
        self.update(
            id,
            VideoPatch {
                status: Some(VideoStatus::Scheduled),
                scheduled_at: Some(when.unwrap_or_else(Utc::now)),
                ..Default::default()
            },
        )
        .await
    }

    /// Publishes a video. Link sources are re-validated here — a URL
    /// that was edited into an invalid state since draft creation fails
    /// with `InvalidUrl` rather than going live.
    pub async fn publish(&self, id: Uuid) -> Result<Option<Video>> {
        let Some(video) = self.get(id).await else {
            return Ok(None);
        };
        if video.source == VideoSource::Link {
            validate_public_url(video.url.as_deref().unwrap_or_default())?;
        }
        self.update(
            id,
            VideoPatch {
                status: Some(VideoStatus::Published),
                published_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
    }

    /// Resolves what a player should load: the stored URL for links, a
    /// blob-backed handle for uploads, empty string if neither resolves.
    pub async fn get_playable_url(&self, video: &Video) -> String {
        match video.source {
            VideoSource::Link => video.url.clone().unwrap_or_default(),
            VideoSource::File => {
                let Some(key) = video.video_key.as_deref() else {
                    return String::new();
                };
                match self.blobs.get(key).await {
                    Ok(Some(_)) => self.blobs.url(key),
                    _ => String::new(),
                }
            }
        }
    }
}

fn sort_by_resolved_timestamp(videos: &mut [Video]) {
    videos.sort_by(|a, b| b.resolved_timestamp().cmp(&a.resolved_timestamp()));
}
