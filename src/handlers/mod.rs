//! Front-end handlers module
//!
//! This module contains the adapters that feed chat turns into a
//! conversation and display its replies:
//! - Command handlers for Telegram bot commands
//! - Message handlers for Telegram text messages
//! - The interactive console loop

pub mod commands;
pub mod console;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use console::run_console;
pub use messages::handle_message;
