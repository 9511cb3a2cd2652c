//! Long-polling transport.

use std::sync::Arc;

use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::app::{AppContext, handle_message};

/// Polls Telegram for updates until Ctrl+C.
///
/// The default polling listener removes any registered webhook first.
pub async fn run(bot: Bot, ctx: Arc<AppContext>) {
    info!("Starting long polling...");

    let handler = Update::filter_message().endpoint(
        |msg: Message, ctx: Arc<AppContext>| async move { handle_message(&ctx, &msg).await },
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|_update| async move {
            debug!("Ignoring non-message update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling a message",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Polling stopped");
}
