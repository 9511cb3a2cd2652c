//! Process-wide state shared by every handler.

use std::path::PathBuf;
use std::sync::Arc;

use crate::naming::WordList;
use crate::pipeline::FilePipeline;
use crate::telegram::Messenger;
use crate::thumbnail::ThumbnailPreparer;

/// Everything a handler needs, built once at startup and only read afterwards.
pub struct AppContext {
    /// Outbound Telegram calls.
    pub messenger: Arc<dyn Messenger>,

    /// Document pipeline.
    pub pipeline: FilePipeline,

    /// Secret path segment the webhook accepts updates on.
    webhook_token: String,
}

impl AppContext {
    /// Builds the context.
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        thumbnails: ThumbnailPreparer,
        words: Option<Arc<WordList>>,
        temp_dir: impl Into<PathBuf>,
        webhook_token: impl Into<String>,
    ) -> Self {
        let pipeline = FilePipeline::new(Arc::clone(&messenger), thumbnails, words, temp_dir);
        Self {
            messenger,
            pipeline,
            webhook_token: webhook_token.into(),
        }
    }

    /// Checks a webhook path segment against the bot token.
    #[must_use]
    pub fn is_webhook_token(&self, candidate: &str) -> bool {
        !self.webhook_token.is_empty() && candidate == self.webhook_token
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
