//! Start command handler
//!
//! Handles the /start command: every /start begins a brand-new conversation

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, info};
use crate::utils::errors::Result;
use crate::state::SessionStore;
use crate::handlers::messages::send_rendered;

/// Handle /start command - discard any live conversation and greet again
pub async fn handle_start(bot: Bot, msg: Message, session_store: SessionStore) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /start command");

    if !chat_id.is_user() {
        bot.send_message(chat_id, "DoseBuddy solo funciona en chats privados.").await?;
        return Ok(());
    }

    let shared = session_store.reset(chat_id.0).await;
    let conversation = shared.lock().await;
    if let Some(greeting) = conversation.greeting() {
        send_rendered(&bot, chat_id, greeting).await?;
    }

    info!(chat_id = chat_id.0, session = %conversation.session_id(), "Conversation started");
    Ok(())
}
