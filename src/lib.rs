//! DoseBuddy chat assistant
//!
//! A conversational front-end for a diabetes insulin-dose prediction service.
//! This library provides the dialogue state machine, the input classifier,
//! the HTTP gateway to the prediction backend and the Telegram and console
//! front-ends that drive it.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DoseBuddyError, Result};

// Re-export main components for easy access
pub use services::{BackendService, PatientBackend, ServiceFactory};
pub use state::{Conversation, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
