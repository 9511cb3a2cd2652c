//! Telegram Bot API client wrapper.

use std::path::Path;

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use super::{Messenger, OutgoingDocument};

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("File download failed: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("File I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// High-level Bot API client.
#[derive(Clone)]
pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    /// Creates a client for the given bot token. No network calls are made.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Returns the underlying teloxide bot.
    #[must_use]
    pub fn inner(&self) -> &Bot {
        &self.bot
    }

    /// Registers `url` as the webhook unless it is already registered.
    ///
    /// Returns `true` if the registration changed.
    pub async fn ensure_webhook(&self, url: &Url) -> Result<bool, TelegramError> {
        let info = self.bot.get_webhook_info().await?;
        let current = info.url.as_ref().map(|u| u.as_str());

        if current == Some(url.as_str()) {
            debug!("Webhook already registered");
            return Ok(false);
        }

        info!(
            "Registering webhook (previously {})",
            if current.is_some() { "set elsewhere" } else { "unset" }
        );
        self.bot.set_webhook(url.clone()).await?;
        Ok(true)
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot").finish_non_exhaustive()
    }
}

#[async_trait]
impl Messenger for TelegramBot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn download(&self, file_id: &str, destination: &Path) -> Result<(), TelegramError> {
        let file = self.bot.get_file(file_id).await?;
        debug!("Downloading {} to {}", file.path, destination.display());

        let mut dst = tokio::fs::File::create(destination).await?;
        self.bot.download_file(&file.path, &mut dst).await?;
        dst.flush().await?;
        Ok(())
    }

    async fn send_document(&self, document: OutgoingDocument) -> Result<(), TelegramError> {
        let input = InputFile::file(document.path).file_name(document.file_name);
        let mut request = self
            .bot
            .send_document(document.chat_id, input)
            .caption(document.caption);

        if let Some(thumbnail) = document.thumbnail {
            request = request.thumbnail(InputFile::memory(thumbnail.into_bytes()));
        }

        request.await?;
        Ok(())
    }
}
