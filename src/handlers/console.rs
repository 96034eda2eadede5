//! Interactive console front-end
//!
//! Reads one turn per line and prints each bot reply. `/start` begins a new
//! conversation; end of input closes the session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::models::Message;
use crate::render::to_console_line;
use crate::services::PatientBackend;
use crate::state::Conversation;
use crate::utils::errors::Result;
use crate::utils::logging::log_session_event;

const PROMPT: &str = "> ";

/// Run a single-user conversation over the given reader and writer
pub async fn run_console<R, W>(reader: R, mut writer: W, backend: &dyn PatientBackend) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut conversation = Conversation::new();
    log_session_event(conversation.session_id(), "console started");
    if let Some(greeting) = conversation.greeting() {
        write_message(&mut writer, greeting).await?;
    }
    write_prompt(&mut writer).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/start" {
            log_session_event(conversation.session_id(), "reset");
            conversation = Conversation::new();
            if let Some(greeting) = conversation.greeting() {
                write_message(&mut writer, greeting).await?;
            }
        } else if let Some(reply) = conversation.handle_turn(&line, backend).await {
            write_message(&mut writer, reply).await?;
        }
        write_prompt(&mut writer).await?;
    }

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    info!(summary = ?conversation.summary(), "Console session ended");
    Ok(())
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &Message) -> Result<()> {
    let line = format!("\n{}\n\n", to_console_line(message));
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}

async fn write_prompt<W: AsyncWrite + Unpin>(writer: &mut W) -> Result<()> {
    writer.write_all(PROMPT.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
