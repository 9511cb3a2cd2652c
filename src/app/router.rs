//! Routes inbound updates to commands or the document pipeline.

use teloxide::types::{Message, Update, UpdateKind};
use tracing::{debug, error, info, warn};

use super::AppContext;
use crate::commands::{BotCommand, messages};
use crate::naming::FALLBACK_BASE;
use crate::pipeline::IncomingFile;
use crate::telegram::TelegramError;

/// Handles one update from any transport.
///
/// Non-message updates are ignored.
pub async fn handle_update(ctx: &AppContext, update: Update) -> Result<(), TelegramError> {
    match update.kind {
        UpdateKind::Message(msg) => handle_message(ctx, &msg).await,
        _ => {
            debug!("Ignoring non-message update");
            Ok(())
        }
    }
}

/// Handles one message, reporting errors back to the chat.
///
/// The error is still returned after the user has been told, so the caller
/// can reflect it (the webhook answers with a server error).
pub async fn handle_message(ctx: &AppContext, msg: &Message) -> Result<(), TelegramError> {
    let result = route_message(ctx, msg).await;

    if let Err(e) = &result {
        error!("Message in chat {} caused an error: {}", msg.chat.id.0, e);
        if let Err(notify_err) = ctx
            .messenger
            .send_text(msg.chat.id, messages::UNEXPECTED_ERROR)
            .await
        {
            warn!("Could not report the error to the user: {}", notify_err);
        }
    }

    result
}

async fn route_message(ctx: &AppContext, msg: &Message) -> Result<(), TelegramError> {
    if let Some(document) = msg.document() {
        let file = IncomingFile {
            file_id: document.file.id.clone(),
            file_name: document
                .file_name
                .clone()
                .unwrap_or_else(|| FALLBACK_BASE.to_owned()),
            chat_id: msg.chat.id,
        };

        let report = ctx.pipeline.process(file).await?;
        debug!("Pipeline finished in stage {}", report.stage);
        return Ok(());
    }

    match msg.text().and_then(BotCommand::parse) {
        Some(command) => {
            info!("Handling command {} in chat {}", command, msg.chat.id.0);
            ctx.messenger.send_text(msg.chat.id, command.reply()).await
        }
        None => {
            debug!("Ignoring message without document or known command");
            Ok(())
        }
    }
}
