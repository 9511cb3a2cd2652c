//! Document processing pipeline.
//!
//! One run per inbound document:
//! 1. Acknowledge receipt
//! 2. Download to a uniquely named temp file
//! 3. Prepare the thumbnail (a failure only changes the caption)
//! 4. Clean and brand the filename
//! 5. Upload the temp file under the new name
//! 6. Remove the temp file, whatever happened in 2-5
//!
//! Failures in 2-5 are logged and reported to the user with a generic
//! message. Only a failure to talk to the user at all is returned as an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use teloxide::types::ChatId;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{ProcessingReport, ProcessingStage};
use crate::commands::messages;
use crate::naming::{WordList, brand_filename, clean_filename};
use crate::telegram::{Messenger, OutgoingDocument, TelegramError};
use crate::thumbnail::ThumbnailPreparer;

/// Prefix of every temporary download.
pub const TEMP_PREFIX: &str = "temp_";

/// Longest original-name fragment kept in a temp file name.
const MAX_TEMP_NAME_CHARS: usize = 100;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Download failed: {0}")]
    Download(#[source] TelegramError),

    #[error("Upload failed: {0}")]
    Upload(#[source] TelegramError),
}

/// A document a user sent to the bot.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Telegram file id used to fetch the content.
    pub file_id: String,

    /// Original filename.
    pub file_name: String,

    /// Chat the document came from and goes back to.
    pub chat_id: ChatId,
}

/// Runs documents through download, rename, thumbnail and upload.
pub struct FilePipeline {
    messenger: Arc<dyn Messenger>,
    thumbnails: ThumbnailPreparer,
    words: Option<Arc<WordList>>,
    temp_dir: PathBuf,
}

impl FilePipeline {
    /// Creates a pipeline. Without a word list, filenames are only branded.
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        thumbnails: ThumbnailPreparer,
        words: Option<Arc<WordList>>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            messenger,
            thumbnails,
            words,
            temp_dir: temp_dir.into(),
        }
    }

    /// Processes one document end to end.
    #[tracing::instrument(skip_all, fields(chat_id = file.chat_id.0, file_name = %file.file_name))]
    pub async fn process(&self, file: IncomingFile) -> Result<ProcessingReport, TelegramError> {
        self.messenger
            .send_text(file.chat_id, messages::RECEIVED)
            .await?;

        let temp_path = self.temp_path_for(&file.file_name);
        let mut report = ProcessingReport::new();

        let outcome = self.transfer(&file, &temp_path, &mut report).await;
        report.temp_removed = remove_temp(&temp_path).await;

        match outcome {
            Ok(()) => {
                report.advance(ProcessingStage::CleanedUp);
                info!(
                    "Sent back as {}",
                    report.file_name.as_deref().unwrap_or_default()
                );
            }
            Err(e) => {
                report.advance(ProcessingStage::Failed);
                error!(
                    "Processing failed after stage {}: {}",
                    report.failed_at.unwrap_or(ProcessingStage::Received),
                    e
                );
                self.messenger
                    .send_text(file.chat_id, messages::PROCESSING_FAILED)
                    .await?;
            }
        }

        Ok(report)
    }

    async fn transfer(
        &self,
        file: &IncomingFile,
        temp_path: &Path,
        report: &mut ProcessingReport,
    ) -> Result<(), PipelineError> {
        self.messenger
            .download(&file.file_id, temp_path)
            .await
            .map_err(PipelineError::Download)?;
        report.advance(ProcessingStage::Downloaded);

        let thumbnail = self.thumbnails.prepare_async().await;
        let caption = if let Some(thumbnail) = &thumbnail {
            let (width, height) = thumbnail.dimensions();
            debug!("Attaching {}x{} thumbnail", width, height);
            report.advance(ProcessingStage::ThumbnailReady);
            messages::PROMO_CAPTION
        } else {
            report.advance(ProcessingStage::ThumbnailFailed);
            messages::NO_THUMBNAIL_CAPTION
        };

        let cleaned = clean_filename(&file.file_name, self.words.as_deref());
        let branded = brand_filename(&cleaned);
        debug!("Renamed \"{}\" -> \"{}\"", file.file_name, branded);
        report.file_name = Some(branded.clone());
        report.advance(ProcessingStage::Cleaned);

        report.thumbnail_attached = thumbnail.is_some();
        self.messenger
            .send_document(OutgoingDocument {
                chat_id: file.chat_id,
                path: temp_path.to_path_buf(),
                file_name: branded,
                caption: caption.to_owned(),
                thumbnail,
            })
            .await
            .map_err(PipelineError::Upload)?;
        report.advance(ProcessingStage::Uploaded);

        Ok(())
    }

    /// Builds a temp path unique to this run.
    fn temp_path_for(&self, file_name: &str) -> PathBuf {
        self.temp_dir.join(format!(
            "{TEMP_PREFIX}{}_{}",
            Uuid::new_v4().simple(),
            sanitize_for_path(file_name)
        ))
    }
}

impl std::fmt::Debug for FilePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePipeline")
            .field("thumbnails", &self.thumbnails)
            .field("words", &self.words.as_ref().map(|w| w.len()))
            .field("temp_dir", &self.temp_dir)
            .finish_non_exhaustive()
    }
}

/// Removes a temp file. A file that was never created counts as removed.
async fn remove_temp(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Failed to remove temp file {}: {}", path.display(), e);
            false
        }
    }
}

/// Keeps a filename usable as a single path component.
fn sanitize_for_path(name: &str) -> String {
    name.chars()
        .take(MAX_TEMP_NAME_CHARS)
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::telegram::fake::FakeMessenger;

    const PAYLOAD: &[u8] = b"%PDF-1.7 fake document body";

    struct Fixture {
        _dir: TempDir,
        temp_dir: PathBuf,
        thumbnail: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let temp_dir = dir.path().join("downloads");
            std::fs::create_dir(&temp_dir).unwrap();

            let thumbnail = dir.path().join("thumbnail.png");
            RgbaImage::from_pixel(400, 400, Rgba([10, 20, 30, 255]))
                .save(&thumbnail)
                .unwrap();

            Self {
                _dir: dir,
                temp_dir,
                thumbnail,
            }
        }

        fn pipeline(&self, messenger: Arc<FakeMessenger>, words: &[&str]) -> FilePipeline {
            FilePipeline::new(
                messenger,
                ThumbnailPreparer::new(&self.thumbnail),
                Some(Arc::new(WordList::from_words(words).unwrap())),
                &self.temp_dir,
            )
        }

        fn leftover_files(&self) -> usize {
            std::fs::read_dir(&self.temp_dir).unwrap().count()
        }
    }

    fn incoming(name: &str) -> IncomingFile {
        IncomingFile {
            file_id: "file-1".to_owned(),
            file_name: name.to_owned(),
            chat_id: ChatId(42),
        }
    }

    #[tokio::test]
    async fn test_process_success() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD));
        let pipeline = fixture.pipeline(Arc::clone(&messenger), &["Movie"]);

        let report = pipeline.process(incoming("My_Movie_File.mp4")).await.unwrap();

        assert!(report.succeeded());
        assert_eq!(report.file_name.as_deref(), Some("My_File_OldTown.mp4"));
        assert!(report.thumbnail_attached);
        assert!(report.temp_removed);

        assert_eq!(messenger.texts(), vec![messages::RECEIVED.to_owned()]);
        let documents = messenger.documents();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].chat_id, ChatId(42));
        assert_eq!(documents[0].file_name, "My_File_OldTown.mp4");
        assert_eq!(documents[0].caption, messages::PROMO_CAPTION);
        assert!(documents[0].has_thumbnail);
        assert_eq!(documents[0].content, PAYLOAD);

        assert!(!documents[0].path.exists());
        assert_eq!(fixture.leftover_files(), 0);
    }

    #[tokio::test]
    async fn test_process_without_thumbnail_still_uploads() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD));
        let pipeline = FilePipeline::new(
            Arc::clone(&messenger) as Arc<dyn Messenger>,
            ThumbnailPreparer::new(fixture.temp_dir.join("missing.jpg")),
            Some(Arc::new(WordList::default())),
            &fixture.temp_dir,
        );

        let report = pipeline.process(incoming("report.pdf")).await.unwrap();

        assert!(report.succeeded());
        assert!(!report.thumbnail_attached);
        let documents = messenger.documents();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].caption, messages::NO_THUMBNAIL_CAPTION);
        assert!(!documents[0].has_thumbnail);
        assert_eq!(documents[0].file_name, "report_OldTown.pdf");
    }

    #[tokio::test]
    async fn test_process_download_failure_cleans_up() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD).failing_download());
        let pipeline = fixture.pipeline(Arc::clone(&messenger), &[]);

        let report = pipeline.process(incoming("a.zip")).await.unwrap();

        assert_eq!(report.stage, ProcessingStage::Failed);
        assert_eq!(report.failed_at, Some(ProcessingStage::Received));
        assert!(report.temp_removed);
        assert!(messenger.documents().is_empty());
        assert_eq!(
            messenger.texts(),
            vec![
                messages::RECEIVED.to_owned(),
                messages::PROCESSING_FAILED.to_owned()
            ]
        );

        let downloads = messenger.downloads();
        assert_eq!(downloads.len(), 1);
        assert!(!downloads[0].exists());
        assert_eq!(fixture.leftover_files(), 0);
    }

    #[tokio::test]
    async fn test_process_upload_failure_cleans_up() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD).failing_upload());
        let pipeline = fixture.pipeline(Arc::clone(&messenger), &["Movie"]);

        let report = pipeline.process(incoming("Movie.mp4")).await.unwrap();

        assert_eq!(report.stage, ProcessingStage::Failed);
        assert_eq!(report.failed_at, Some(ProcessingStage::Cleaned));
        assert_eq!(report.file_name.as_deref(), Some("file_OldTown.mp4"));
        assert!(report.temp_removed);
        assert_eq!(
            messenger.texts().last().map(String::as_str),
            Some(messages::PROCESSING_FAILED)
        );
        assert_eq!(fixture.leftover_files(), 0);
    }

    #[tokio::test]
    async fn test_process_without_word_list_only_brands() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD));
        let pipeline = FilePipeline::new(
            Arc::clone(&messenger) as Arc<dyn Messenger>,
            ThumbnailPreparer::new(&fixture.thumbnail),
            None,
            &fixture.temp_dir,
        );

        let report = pipeline.process(incoming("My Movie.mp4")).await.unwrap();
        assert_eq!(report.file_name.as_deref(), Some("My_Movie_OldTown.mp4"));
    }

    #[tokio::test]
    async fn test_ack_failure_is_returned() {
        let fixture = Fixture::new();
        let messenger = Arc::new(FakeMessenger::with_payload(PAYLOAD).failing_text());
        let pipeline = fixture.pipeline(Arc::clone(&messenger), &[]);

        assert!(pipeline.process(incoming("a.txt")).await.is_err());
        assert!(messenger.downloads().is_empty());
    }

    #[test]
    fn test_temp_paths_are_unique_per_run() {
        let fixture = Fixture::new();
        let pipeline = fixture.pipeline(Arc::new(FakeMessenger::default()), &[]);

        let first = pipeline.temp_path_for("same.pdf");
        let second = pipeline.temp_path_for("same.pdf");

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(fixture.temp_dir.as_path()));
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(TEMP_PREFIX));
        assert!(name.ends_with("_same.pdf"));
    }

    #[test]
    fn test_sanitize_for_path() {
        assert_eq!(sanitize_for_path("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_for_path("a\\b"), "a_b");
        assert_eq!(sanitize_for_path(&"x".repeat(300)).len(), MAX_TEMP_NAME_CHARS);
    }
}
