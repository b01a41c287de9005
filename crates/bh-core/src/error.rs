//! # AppError
//!
//! Centralized error handling for the Il Borghista persistence core.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all bh-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required identifier or field was absent on a write operation
    /// (e.g., creating a chat thread without both participant ids).
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A link-sourced video URL is not a well-formed http/https URI.
    /// Raised at draft creation and re-checked at publish time.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Appending to a chat thread that does not exist. CRUD getters on the
    /// other repositories miss with `None` instead; chat requires an
    /// existing conversation to append to.
    #[error("chat thread not found: {0}")]
    ThreadNotFound(Uuid),

    /// The underlying storage engine failed (e.g., data directory gone,
    /// quota exceeded). Surfaced to the caller unmodified, no retries.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A record could not be serialized for the collection payload.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A specialized Result type for Il Borghista logic.
pub type Result<T> = std::result::Result<T, AppError>;
