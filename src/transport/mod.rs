//! Update delivery.
//!
//! Two interchangeable ways of getting updates into the router, picked at
//! startup: long polling or an HTTP webhook.

pub mod polling;
pub mod webhook;

use std::sync::Arc;

use thiserror::Error;

use crate::app::AppContext;
use crate::config::{ConfigError, Settings};
use crate::telegram::{TelegramBot, TelegramError};

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TransportMode {
    /// Ask Telegram for updates in a loop.
    Polling,

    /// Receive updates over HTTP.
    #[default]
    Webhook,
}

/// Errors that stop a transport from running.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telegram(#[from] TelegramError),

    #[error("Webhook server failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the selected transport until shutdown.
pub async fn run(
    mode: TransportMode,
    ctx: Arc<AppContext>,
    bot: &TelegramBot,
    settings: &Settings,
) -> Result<(), TransportError> {
    match mode {
        TransportMode::Polling => {
            polling::run(bot.inner().clone(), ctx).await;
            Ok(())
        }
        TransportMode::Webhook => webhook::serve(ctx, bot, settings).await,
    }
}
