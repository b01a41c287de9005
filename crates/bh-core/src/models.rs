//! # Domain Models
//!
//! These structs represent the core entities of Il Borghista's local
//! persistence layer. We use UUID v7 for time-ordered, globally unique
//! identification, and all timestamps are ISO-8601 via chrono.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an itinerary.
///
/// No transition rules are enforced by the repository: any status may be
/// set directly through a patch, and `submit_for_review`/`publish` are
/// convenience patches rather than a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryStatus {
    Draft,
    InReview,
    Published,
}

/// A single stop along an itinerary. Order within `Itinerary::stops` is
/// the visiting order and is semantically meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub time: String,
    pub cost: String,
    pub tip: String,
}

/// Practical advice shown at the end of an itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalTips {
    pub how_to_arrive: String,
    pub parking: String,
    pub best_period: String,
    pub extra_tips: String,
}

/// A user-authored multi-stop travel plan anchored to a main borgo.
///
/// `main_borgo_slug` is always normalized (trim + lowercase) on every
/// write. Gallery images live in the image blob store; `gallery_keys`
/// holds their keys so large media never bloats the record collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: Uuid,
    /// Owner reference; not enforced as a foreign key.
    pub user_id: String,
    pub status: ItineraryStatus,
    pub title: String,
    pub main_borgo_slug: String,
    pub date_of_trip: String,
    pub duration: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub stops: Vec<Stop>,
    pub final_tips: FinalTips,
    pub gallery_keys: Vec<String>,
    pub cover_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shallow merge-patch for [`Itinerary`]. `None` fields are left
/// untouched; `status` may be overwritten directly (unchecked enum).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItineraryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItineraryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_borgo_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_trip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<Stop>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_tips: Option<FinalTips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// A published itinerary annotated with its distance from the query
/// borgo, as returned by the proximity query.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyItinerary {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub distance_km: f64,
}

/// Lifecycle state of a creator video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Draft,
    Scheduled,
    Published,
}

/// Where a video's bytes come from: an uploaded file stored in the blob
/// store, or an external link on a third-party platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    File,
    Link,
}

/// Hosting platform of a link-sourced video, derived from its hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
    Altro,
}

/// A creator-produced video associated with a borgo and optionally a POI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub borgo_slug: String,
    pub poi_id: Option<String>,
    pub category: String,
    pub status: VideoStatus,
    pub source: VideoSource,
    /// Blob store key for `file`-sourced videos.
    pub video_key: Option<String>,
    /// Transient playback handle for `file`-sourced videos.
    pub local_url: Option<String>,
    /// External URI for `link`-sourced videos.
    pub url: Option<String>,
    pub platform: Option<Platform>,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub views: u64,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Video {
    /// Timestamp used for sorting listings: prefers `published_at`,
    /// falling back to `created_at`. A final fallback to `updated_at`
    /// is dead by construction while `created_at` stays non-optional;
    /// reinstate it if `created_at` ever becomes `Option`.
    pub fn resolved_timestamp(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// Shallow merge-patch for [`Video`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borgo_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Raw overwrite; not re-validated or re-classified until publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Payload carried by a new video: raw bytes for uploads, an external
/// URI for links. Bytes stay out of the record collection; the
/// repository moves them into the blob store.
#[derive(Debug, Clone)]
pub enum VideoUpload {
    File(Bytes),
    Link(String),
}

/// Input for `VideoRepo::create_draft` and `add_external_published`.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub borgo_slug: String,
    pub poi_id: Option<String>,
    pub category: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub upload: VideoUpload,
}

/// A single message inside a chat thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: String,
    pub text: String,
    pub ts: DateTime<Utc>,
}

/// A conversation between a user and a creator. At most one thread
/// exists per (user_id, creator_id) pair; creation is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: Uuid,
    pub user_id: String,
    pub creator_id: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ItineraryStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }

    #[test]
    fn platform_serializes_lowercase() {
        let json = serde_json::to_string(&Platform::Tiktok).unwrap();
        assert_eq!(json, "\"tiktok\"");
    }

    #[test]
    fn patch_deserializes_partial_json() {
        let patch: ItineraryPatch =
            serde_json::from_str(r#"{"duration": "2d"}"#).unwrap();
        assert_eq!(patch.duration.as_deref(), Some("2d"));
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
    }
}
