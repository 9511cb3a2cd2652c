//! Pipeline stages and run reports.

use std::fmt;

/// Where a document is in its trip through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Received,
    Downloaded,
    ThumbnailReady,
    ThumbnailFailed,
    Cleaned,
    Uploaded,
    CleanedUp,
    Failed,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Downloaded => "downloaded",
            Self::ThumbnailReady => "thumbnail_ready",
            Self::ThumbnailFailed => "thumbnail_failed",
            Self::Cleaned => "cleaned",
            Self::Uploaded => "uploaded",
            Self::CleanedUp => "cleaned_up",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingReport {
    /// Final stage reached.
    pub stage: ProcessingStage,

    /// Last stage completed before a failure, if the run failed.
    pub failed_at: Option<ProcessingStage>,

    /// Name the document was (or would have been) sent under.
    pub file_name: Option<String>,

    /// Whether a thumbnail was attached to the upload.
    pub thumbnail_attached: bool,

    /// Whether the temporary download was removed.
    pub temp_removed: bool,
}

impl ProcessingReport {
    pub(crate) const fn new() -> Self {
        Self {
            stage: ProcessingStage::Received,
            failed_at: None,
            file_name: None,
            thumbnail_attached: false,
            temp_removed: false,
        }
    }

    pub(crate) fn advance(&mut self, stage: ProcessingStage) {
        if stage == ProcessingStage::Failed {
            self.failed_at = Some(self.stage);
        }
        self.stage = stage;
    }

    /// Returns true if the document was delivered.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.stage == ProcessingStage::CleanedUp
    }
}
