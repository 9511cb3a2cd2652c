//! Renders the fixed thumbnail image.

use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tracing::{debug, error};

use super::{JPEG_QUALITY, MAX_THUMBNAIL_HEIGHT, MAX_THUMBNAIL_WIDTH};

/// Errors that can occur while preparing the thumbnail.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Thumbnail source not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to process thumbnail image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Thumbnail task failed: {0}")]
    Task(String),
}

/// An encoded JPEG thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl Thumbnail {
    /// Consumes the thumbnail, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the pixel dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Produces the thumbnail from a fixed source image.
#[derive(Debug, Clone)]
pub struct ThumbnailPreparer {
    source: PathBuf,
}

impl ThumbnailPreparer {
    /// Creates a preparer reading from `source`.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Loads, shrinks and encodes the source image.
    pub fn try_prepare(&self) -> Result<Thumbnail, ThumbnailError> {
        if !self.source.exists() {
            return Err(ThumbnailError::NotFound(self.source.clone()));
        }

        let img = DynamicImage::ImageRgb8(image::open(&self.source)?.to_rgb8());
        let img = fit_within(img, MAX_THUMBNAIL_WIDTH, MAX_THUMBNAIL_HEIGHT);
        let (width, height) = img.dimensions();

        let mut bytes = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))?;

        debug!("Prepared {}x{} thumbnail ({} bytes)", width, height, bytes.len());
        Ok(Thumbnail {
            bytes,
            width,
            height,
        })
    }

    /// Prepares the thumbnail, logging and returning `None` on any failure.
    #[must_use]
    pub fn prepare(&self) -> Option<Thumbnail> {
        match self.try_prepare() {
            Ok(thumbnail) => Some(thumbnail),
            Err(e) => {
                error!("Failed to prepare thumbnail: {}", e);
                None
            }
        }
    }

    /// Prepares the thumbnail on the blocking thread pool.
    pub async fn prepare_async(&self) -> Option<Thumbnail> {
        let preparer = self.clone();
        match tokio::task::spawn_blocking(move || preparer.prepare()).await {
            Ok(thumbnail) => thumbnail,
            Err(e) => {
                error!("{}", ThumbnailError::Task(e.to_string()));
                None
            }
        }
    }
}

/// Shrinks an image to fit the bounds, keeping its aspect ratio. Never upscales.
fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        return img;
    }
    img.resize(max_width, max_height, FilterType::Lanczos3)
}
