//! Thumbnail preparation.
//!
//! Every outgoing document carries the same small JPEG preview, rendered
//! from a fixed source image on disk.

mod preparer;

pub use preparer::{Thumbnail, ThumbnailError, ThumbnailPreparer};

/// Maximum thumbnail width in pixels.
pub const MAX_THUMBNAIL_WIDTH: u32 = 200;

/// Maximum thumbnail height in pixels.
pub const MAX_THUMBNAIL_HEIGHT: u32 = 300;

/// JPEG quality used when encoding the thumbnail.
pub const JPEG_QUALITY: u8 = 85;
