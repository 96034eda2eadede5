//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

pub const HELP_TEXT: &str = "🤖 Ayuda de DoseBuddy\n\n\
    /start - Comenzar una nueva conversación\n\
    /help - Mostrar este mensaje\n\n\
    Cuéntame tu día en una frase, por ejemplo: 'Hice 20 min de ejercicio, comí pan y mi glucosa es 95'.\n\
    También puedes hacer preguntas: '¿Qué alimentos puedo comer?'\n\n\
    Después de cada resultado escribe 'otro', 'mas' o 'salir'.\n\
    Esta herramienta es educativa: consulta siempre con tu médico.";

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
