//! Production raster backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, TIFF) | `image::load_from_memory_with_format` |
//! | Rescale | `image::DynamicImage::resize_exact`, `Triangle` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at fixed quality |
//! | Encode → PNG / GIF / TIFF | `image::DynamicImage::write_to` |
//!
//! All work is in-memory: bytes in, bytes out. The store decides where
//! encoded renditions land on disk.

use super::backend::{DecodeError, DecodedImage, EncodeError, ImageBackend, RescaleError};
use super::params::Quality;
use crate::format::ImageFormat;
use image::imageops::FilterType;
use std::io::Cursor;

/// Bilinear resampling: the pipeline's quality-preserving default.
const RESCALE_FILTER: FilterType = FilterType::Triangle;

fn codec_format(format: ImageFormat) -> Option<image::ImageFormat> {
    match format {
        ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
        ImageFormat::Png => Some(image::ImageFormat::Png),
        ImageFormat::Gif => Some(image::ImageFormat::Gif),
        ImageFormat::Tiff => Some(image::ImageFormat::Tiff),
        ImageFormat::Unknown => None,
    }
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RasterBackend {
    fn decode(
        &self,
        media_bytes: &[u8],
        format: ImageFormat,
    ) -> Result<DecodedImage, DecodeError> {
        let codec = codec_format(format).ok_or(DecodeError::UnknownFormat)?;
        let raster = image::load_from_memory_with_format(media_bytes, codec)
            .map_err(|source| DecodeError::Malformed { format, source })?;
        Ok(raster.into())
    }

    fn rescale(
        &self,
        source: &DecodedImage,
        target_width: u32,
        target_height: u32,
    ) -> Result<DecodedImage, RescaleError> {
        if target_width == 0 || target_height == 0 {
            return Err(RescaleError::DegenerateTarget {
                width: target_width,
                height: target_height,
            });
        }
        // resize_exact keeps the source's color type; the planner already
        // computed an aspect-preserving height.
        let scaled = source
            .raster()
            .resize_exact(target_width, target_height, RESCALE_FILTER);
        Ok(scaled.into())
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, EncodeError> {
        let codec = codec_format(format).ok_or(EncodeError::UnknownFormat)?;
        let mut bytes = Vec::new();

        match codec {
            image::ImageFormat::Jpeg => {
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut bytes,
                    quality.value() as u8,
                );
                image
                    .raster()
                    .write_with_encoder(encoder)
                    .map_err(|source| EncodeError::Rejected { format, source })?;
            }
            other => {
                image
                    .raster()
                    .write_to(&mut Cursor::new(&mut bytes), other)
                    .map_err(|source| EncodeError::Rejected { format, source })?;
            }
        }
        Ok(bytes)
    }
}
