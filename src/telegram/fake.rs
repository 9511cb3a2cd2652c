//! In-memory messenger for tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use teloxide::types::ChatId;

use super::{Messenger, OutgoingDocument, TelegramError};

/// A document as it was seen at upload time.
#[derive(Debug, Clone)]
pub struct SentDocument {
    pub chat_id: ChatId,
    pub path: PathBuf,
    pub file_name: String,
    pub caption: String,
    pub has_thumbnail: bool,
    pub content: Vec<u8>,
}

#[derive(Debug, Default)]
struct Recorded {
    texts: Vec<(ChatId, String)>,
    downloads: Vec<PathBuf>,
    file_ids: Vec<String>,
    documents: Vec<SentDocument>,
}

/// Records every call and serves a fixed download payload.
#[derive(Debug, Default)]
pub struct FakeMessenger {
    payload: Vec<u8>,
    fail_download: bool,
    fail_upload: bool,
    fail_text: bool,
    recorded: Mutex<Recorded>,
}

impl FakeMessenger {
    pub fn with_payload(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            ..Self::default()
        }
    }

    pub fn failing_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    pub fn texts(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .texts
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        self.recorded.lock().unwrap().downloads.clone()
    }

    pub fn file_ids(&self) -> Vec<String> {
        self.recorded.lock().unwrap().file_ids.clone()
    }

    pub fn documents(&self) -> Vec<SentDocument> {
        self.recorded.lock().unwrap().documents.clone()
    }
}

fn simulated_failure(what: &str) -> TelegramError {
    TelegramError::Io(std::io::Error::other(format!("simulated {what} failure")))
}

#[async_trait]
impl Messenger for FakeMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        if self.fail_text {
            return Err(simulated_failure("send_text"));
        }
        self.recorded
            .lock()
            .unwrap()
            .texts
            .push((chat_id, text.to_owned()));
        Ok(())
    }

    async fn download(&self, file_id: &str, destination: &Path) -> Result<(), TelegramError> {
        {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.file_ids.push(file_id.to_owned());
            recorded.downloads.push(destination.to_path_buf());
        }

        tokio::fs::write(destination, &self.payload).await?;
        if self.fail_download {
            // Leave a partial file behind, like an interrupted transfer.
            return Err(simulated_failure("download"));
        }
        Ok(())
    }

    async fn send_document(&self, document: OutgoingDocument) -> Result<(), TelegramError> {
        let content = tokio::fs::read(&document.path).await?;
        if self.fail_upload {
            return Err(simulated_failure("upload"));
        }

        self.recorded.lock().unwrap().documents.push(SentDocument {
            chat_id: document.chat_id,
            path: document.path,
            file_name: document.file_name,
            caption: document.caption,
            has_thumbnail: document.thumbnail.is_some(),
            content,
        });
        Ok(())
    }
}
