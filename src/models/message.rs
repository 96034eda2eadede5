//! Chat message model and the append-only message log

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// How the text of a message should be interpreted by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Richness {
    /// Shown verbatim
    Plain,
    /// Contains `**bold**` spans
    Emphasis,
    /// Already rendered as Telegram-flavoured HTML
    Structured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub richness: Richness,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            richness: Richness::Plain,
            sent_at: Utc::now(),
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, richness: Richness) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            richness,
            sent_at: Utc::now(),
        }
    }
}

/// Ordered, append-only history of a conversation
///
/// Ids are assigned by the caller and must strictly increase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        debug_assert!(
            self.messages.last().map_or(true, |last| last.id < message.id),
            "message ids must strictly increase"
        );
        self.messages.push(message);
    }

    pub fn all(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
