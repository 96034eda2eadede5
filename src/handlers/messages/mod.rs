//! Message handlers module
//!
//! Feeds private-chat text messages into the chat's conversation

use teloxide::{Bot, types::{ChatId, Message, ParseMode}, prelude::*};
use tracing::{debug, info};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::state::SessionStore;
use crate::models;
use crate::render::to_telegram_html;

/// Handle incoming text messages
///
/// The conversation lock is held until the reply is sent, so replies of one
/// chat go out in the order its messages arrived.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: std::sync::Arc<ServiceFactory>,
    session_store: SessionStore,
) -> Result<()> {
    let chat_id = msg.chat.id;

    if !chat_id.is_user() {
        debug!(chat_id = ?chat_id, "Ignoring message outside a private chat");
        return Ok(());
    }

    let Some(text) = msg.text() else {
        debug!(chat_id = ?chat_id, "Ignoring non-text message");
        return Ok(());
    };

    let (shared, created) = session_store.get_or_create(chat_id.0).await;
    let mut conversation = shared.lock().await;

    // A fresh conversation has not shown its greeting yet, so this text is
    // not an answer to the name prompt.
    if created {
        info!(chat_id = chat_id.0, session = %conversation.session_id(), "Conversation started by message");
        if let Some(greeting) = conversation.greeting() {
            send_rendered(&bot, chat_id, greeting).await?;
        }
        return Ok(());
    }

    let reply = conversation.handle_turn(text, &services.backend).await.cloned();
    if let Some(reply) = reply {
        send_rendered(&bot, chat_id, &reply).await?;
    }

    debug!(summary = ?conversation.summary(), "Turn complete");
    Ok(())
}

/// Send a log message to a chat using HTML formatting
pub(crate) async fn send_rendered(bot: &Bot, chat_id: ChatId, message: &models::Message) -> Result<()> {
    bot.send_message(chat_id, to_telegram_html(message))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
