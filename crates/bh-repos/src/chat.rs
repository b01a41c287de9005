//! Chat repository: idempotent thread creation and append-only
//! messaging between a user and a creator.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use bh_core::error::{AppError, Result};
use bh_core::models::{ChatMessage, ChatThread};
use bh_core::ports::{collections, RecordStore};

use crate::collection;

pub struct ChatRepo {
    records: Arc<dyn RecordStore>,
}

impl ChatRepo {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    async fn load(&self) -> Vec<ChatThread> {
        collection::load(self.records.as_ref(), collections::CHAT_THREADS).await
    }

    async fn save(&self, threads: &[ChatThread]) -> Result<()> {
        collection::save(self.records.as_ref(), collections::CHAT_THREADS, threads).await
    }

    /// At most one thread exists per (user, creator) pair: if one is
    /// already there it is returned as-is, otherwise an empty thread is
    /// created. Both participant ids are required.
    pub async fn create_thread(&self, user_id: &str, creator_id: &str) -> Result<ChatThread> {
        if user_id.trim().is_empty() {
            return Err(AppError::MissingField("user_id"));
        }
        if creator_id.trim().is_empty() {
            return Err(AppError::MissingField("creator_id"));
        }

        let mut threads = self.load().await;
        if let Some(existing) = threads
            .iter()
            .find(|t| t.user_id == user_id && t.creator_id == creator_id)
        {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let thread = ChatThread {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            creator_id: creator_id.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        threads.push(thread.clone());
        self.save(&threads).await?;
        Ok(thread)
    }

    pub async fn get(&self, thread_id: Uuid) -> Option<ChatThread> {
        self.load().await.into_iter().find(|t| t.id == thread_id)
    }

    /// Threads where the given id is either party.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<ChatThread> {
        self.load()
            .await
            .into_iter()
            .filter(|t| t.user_id == user_id || t.creator_id == user_id)
            .collect()
    }

    /// Appends a message to an existing thread. Unlike the CRUD getters,
    /// a missing thread is an error here: there is no conversation to
    /// append to.
    pub async fn add_message(
        &self,
        thread_id: Uuid,
        sender_id: &str,
        text: &str,
    ) -> Result<ChatMessage> {
        let mut threads = self.load().await;
        let Some(thread) = threads.iter_mut().find(|t| t.id == thread_id) else {
            return Err(AppError::ThreadNotFound(thread_id));
        };

        let now = Utc::now();
        let message = ChatMessage {
            id: Uuid::now_v7(),
            sender_id: sender_id.to_string(),
            text: text.trim().to_string(),
            ts: now,
        };
        thread.messages.push(message.clone());
        thread.updated_at = now;
        self.save(&threads).await?;
        Ok(message)
    }
}
