//! Command handlers module
//!
//! This module contains handlers for the bot commands /start and /help.

pub mod start;
pub mod help;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::state::SessionStore;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos de DoseBuddy:")]
pub enum Command {
    #[command(description = "Comenzar una nueva conversación")]
    Start,
    #[command(description = "Mostrar la ayuda")]
    Help,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    session_store: SessionStore,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, session_store).await,
        Command::Help => help::handle_help(bot, msg).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "dosebuddy_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "dosebuddy_bot").unwrap(), Command::Help);
        assert!(Command::parse("/events", "dosebuddy_bot").is_err());
    }
}
