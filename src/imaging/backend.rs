//! Raster backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three pixel-level operations the
//! pipeline needs: decode, rescale, and encode. The production
//! implementation is [`RasterBackend`](super::raster_backend::RasterBackend);
//! orchestration tests use the recording [`MockBackend`](tests::MockBackend)
//! so they never touch real pixels.
//!
//! Error types are deliberately separate per operation: decode failures are
//! fatal to an upload, while rescale and encode failures only degrade a
//! single rendition width.

use super::params::Quality;
use crate::format::ImageFormat;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot decode an unclassified payload")]
    UnknownFormat,
    #[error("malformed {format} stream: {source}")]
    Malformed {
        format: ImageFormat,
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum RescaleError {
    #[error("degenerate target dimensions {width}x{height}")]
    DegenerateTarget { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("cannot encode to an unclassified format")]
    UnknownFormat,
    #[error("{format} encoder rejected the image: {source}")]
    Rejected {
        format: ImageFormat,
        source: image::ImageError,
    },
}

/// An in-memory raster with known dimensions and color layout.
///
/// The pixel buffer is owned solely by this value — decode never aliases the
/// input bytes, and rescale produces a fresh buffer — so concurrent
/// per-width rescales can all read one source without synchronization.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    raster: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Color layout of the pixel buffer. Rescaling preserves it.
    pub fn color(&self) -> image::ColorType {
        self.raster.color()
    }

    pub(crate) fn raster(&self) -> &DynamicImage {
        &self.raster
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(raster: DynamicImage) -> Self {
        Self { raster }
    }
}

/// Trait for raster backends.
///
/// `Sync` because the pipeline fans rescale/encode work out across rayon
/// workers that share one backend reference.
pub trait ImageBackend: Sync {
    /// Decode validated bytes into an owned raster.
    fn decode(&self, media_bytes: &[u8], format: ImageFormat)
    -> Result<DecodedImage, DecodeError>;

    /// Produce a new raster at exactly the target dimensions, preserving the
    /// source's color layout. Must not mutate `source`.
    fn rescale(
        &self,
        source: &DecodedImage,
        target_width: u32,
        target_height: u32,
    ) -> Result<DecodedImage, RescaleError>;

    /// Serialize a raster back to the format's byte encoding.
    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, EncodeError>;
}
