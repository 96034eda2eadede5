//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod message;
pub mod session;

// Re-export commonly used models
pub use message::{Message, MessageLog, Richness, Sender};
pub use session::{SessionState, StepId};
