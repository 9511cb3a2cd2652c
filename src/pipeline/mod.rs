//! Document processing pipeline module.
//!
//! Takes a document a user sent, renames it, attaches the thumbnail and
//! sends it back, cleaning up its temporary download on every path.

mod processor;
mod stage;

pub use processor::{FilePipeline, IncomingFile, PipelineError, TEMP_PREFIX};
pub use stage::{ProcessingReport, ProcessingStage};
