//! The Bot API calls the bot depends on.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use teloxide::types::ChatId;

use super::TelegramError;
use crate::thumbnail::Thumbnail;

/// A document to send back to a chat.
#[derive(Debug, Clone)]
pub struct OutgoingDocument {
    /// Chat to send the document to.
    pub chat_id: ChatId,

    /// Local file holding the document content.
    pub path: PathBuf,

    /// Filename the recipient sees.
    pub file_name: String,

    /// Caption shown under the document.
    pub caption: String,

    /// Optional preview image.
    pub thumbnail: Option<Thumbnail>,
}

/// Outbound operations against the messaging platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError>;

    /// Downloads a file by its id into `destination`.
    async fn download(&self, file_id: &str, destination: &Path) -> Result<(), TelegramError>;

    /// Uploads a document.
    async fn send_document(&self, document: OutgoingDocument) -> Result<(), TelegramError>;
}
