//! Dialogue state module
//!
//! This module holds the conversation state machine, its input classifier,
//! the reply texts and the per-chat conversation storage

pub mod classifier;
pub mod context;
pub mod replies;
pub mod storage;
pub mod transitions;

// Re-export commonly used state components
pub use classifier::{classify, TurnKind};
pub use context::{Conversation, ConversationSummary};
pub use replies::BotReply;
pub use storage::{SessionStore, SharedConversation, StorageStats};
pub use transitions::{required_call, transition, RemoteCall, RemoteOutcome, Transition};
