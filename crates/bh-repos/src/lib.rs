//! # bh-repos
//!
//! Repository layer of the Il Borghista persistence core: CRUD, status
//! workflows and query logic over the `RecordStore`/`BlobStore` ports.
//! UI components call these operations; nothing here renders anything.

mod collection;

pub mod chat;
pub mod itinerary;
pub mod video;

pub use chat::ChatRepo;
pub use itinerary::ItineraryRepo;
pub use video::{detect_platform, youtube_thumbnail, youtube_video_id, VideoRepo};
