//! Session storage implementation
//!
//! Conversations live in memory, keyed by chat id. Each one sits behind its
//! own async mutex: a front-end holds the lock for a whole turn, so turns of
//! one chat are processed one at a time in arrival order while different
//! chats proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use chrono::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::utils::logging::log_session_event;
use super::context::Conversation;

/// Upper bound accepted by `chrono::Duration::seconds`
const MAX_TTL_SECONDS: u64 = (i64::MAX / 1000) as u64;

/// Handle to a conversation shared between the store and a running turn
pub type SharedConversation = Arc<Mutex<Conversation>>;

/// In-memory conversation storage
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, SharedConversation>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Create a new session store instance
    pub fn new(config: &SessionConfig) -> Self {
        let seconds = config.idle_ttl_seconds.min(MAX_TTL_SECONDS) as i64;
        let idle_ttl = Duration::seconds(seconds);

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Get the chat's conversation, starting a fresh one if none is live
    ///
    /// The flag is `true` when a new conversation was created, either because
    /// the chat had none or because the previous one sat idle past the TTL.
    pub async fn get_or_create(&self, chat_id: i64) -> (SharedConversation, bool) {
        if let Some(existing) = self.sessions.read().await.get(&chat_id).cloned() {
            if !self.is_stale(&existing) {
                return (existing, false);
            }
        }

        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions.get(&chat_id) {
            if !self.is_stale(existing) {
                return (existing.clone(), false);
            }
            debug!(chat_id = chat_id, "Replacing expired conversation");
        }

        let conversation = Conversation::new();
        log_session_event(conversation.session_id(), "created");
        let shared = Arc::new(Mutex::new(conversation));
        sessions.insert(chat_id, shared.clone());
        (shared, true)
    }

    /// Replace the chat's conversation with a fresh one
    pub async fn reset(&self, chat_id: i64) -> SharedConversation {
        let conversation = Conversation::new();
        log_session_event(conversation.session_id(), "reset");
        let shared = Arc::new(Mutex::new(conversation));
        self.sessions.write().await.insert(chat_id, shared.clone());
        shared
    }

    /// Delete the chat's conversation
    pub async fn remove(&self, chat_id: i64) -> bool {
        let removed = self.sessions.write().await.remove(&chat_id).is_some();
        if removed {
            debug!("Deleted conversation for chat {}", chat_id);
        } else {
            debug!("No conversation to delete for chat {}", chat_id);
        }
        removed
    }

    /// Check if a conversation exists for a chat
    pub async fn contains(&self, chat_id: i64) -> bool {
        self.sessions.read().await.contains_key(&chat_id)
    }

    /// Drop conversations idle past the TTL
    ///
    /// A conversation whose lock is held is mid-turn and is never dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, shared| !self.is_stale(shared));
        let cleaned = before - sessions.len();

        if cleaned > 0 {
            info!(cleaned = cleaned, remaining = sessions.len(), "Cleaned up expired conversations");
        }
        cleaned
    }

    /// Get storage statistics
    pub async fn stats(&self) -> StorageStats {
        StorageStats {
            active_sessions: self.sessions.read().await.len(),
            idle_ttl_seconds: self.idle_ttl.num_seconds(),
        }
    }

    fn is_stale(&self, shared: &SharedConversation) -> bool {
        match shared.try_lock() {
            Ok(conversation) => conversation.is_expired(self.idle_ttl),
            Err(_) => false,
        }
    }
}

/// Storage statistics structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub active_sessions: usize,
    pub idle_ttl_seconds: i64,
}
