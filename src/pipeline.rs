//! Upload orchestration: validate → decode → plan → store.
//!
//! [`ingest`] runs one upload through the whole pipeline and returns the
//! [`RenditionSet`] the calling layer embeds in its post record. The stages
//! map to terminal states like so:
//!
//! - validation failure → rejected, nothing written;
//! - decode failure → failed, nothing written;
//! - original store failure → failed (every post needs a canonical image);
//! - per-width rescale/encode/store failure → that width is logged and
//!   omitted, the upload still succeeds.
//!
//! Per-width units share only the read-only decoded raster, so they fan out
//! across rayon workers. Concurrent invocations share nothing but the
//! filesystem namespace, which upload-id uniqueness keeps collision-free.

use crate::format::ImageFormat;
use crate::imaging::{
    DecodeError, DecodedImage, EncodeError, ImageBackend, Quality, RasterBackend, RescaleError,
};
use crate::plan::{self, DEFAULT_RENDITION_WIDTHS, PlannedRendition};
use crate::store::{RenditionClass, RenditionStore, StoreError, StoredLocation};
use crate::validate::{self, UploadRequest, ValidationError};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Terminal failures surfaced to the caller. Degraded per-width failures
/// never appear here.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to store original: {0}")]
    OriginalStore(#[from] StoreError),
}

/// Everything that can sink one rendition width. Internal: these degrade,
/// they do not propagate.
#[derive(Error, Debug)]
enum RenditionError {
    #[error(transparent)]
    Rescale(#[from] RescaleError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory of the rendition layout.
    pub media_root: PathBuf,
    /// Target widths, ascending.
    pub widths: Vec<u32>,
    /// Fixed lossy encode quality for every rendition.
    pub quality: Quality,
}

impl PipelineConfig {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
            widths: DEFAULT_RENDITION_WIDTHS.to_vec(),
            quality: Quality::default(),
        }
    }
}

/// Stored locations of one upload, immutable after construction.
///
/// `renditions` holds only the widths that were actually produced; a width
/// is absent when the source was too narrow or its unit of work degraded.
#[derive(Debug, Clone, Serialize)]
pub struct RenditionSet {
    pub original: StoredLocation,
    pub renditions: BTreeMap<u32, StoredLocation>,
}

impl RenditionSet {
    pub fn rendition(&self, width: u32) -> Option<&StoredLocation> {
        self.renditions.get(&width)
    }
}

/// Ingest one upload with the production raster backend.
pub fn ingest(request: &UploadRequest, config: &PipelineConfig) -> Result<RenditionSet, IngestError> {
    let backend = RasterBackend::new();
    ingest_with_backend(&backend, request, config)
}

/// Ingest one upload using a specific backend (allows testing with a mock).
pub fn ingest_with_backend(
    backend: &impl ImageBackend,
    request: &UploadRequest,
    config: &PipelineConfig,
) -> Result<RenditionSet, IngestError> {
    let format = validate::validate(request)?;
    let decoded = backend.decode(&request.media_bytes, format)?;
    let planned = plan::plan_renditions(decoded.width(), decoded.height(), &config.widths);

    // Fresh per upload; shared as the filename stem by every file below.
    let upload_id = Uuid::new_v4();
    let store = RenditionStore::new(&config.media_root);

    debug!(
        %upload_id,
        %format,
        width = decoded.width(),
        height = decoded.height(),
        planned = planned.len(),
        "ingesting upload"
    );

    // The untouched original goes first; its failure is fatal, and writing
    // it before the fan-out means a failed original leaves no orphans.
    let original = store.store(
        &request.media_bytes,
        RenditionClass::Original,
        upload_id,
        format.extension(),
    )?;

    let renditions: BTreeMap<u32, StoredLocation> = planned
        .par_iter()
        .filter_map(|rendition| {
            match produce_rendition(
                backend,
                &store,
                &decoded,
                *rendition,
                format,
                config.quality,
                upload_id,
            ) {
                Ok(location) => Some((rendition.width, location)),
                Err(error) => {
                    warn!(%upload_id, width = rendition.width, error = %error, "dropping rendition");
                    None
                }
            }
        })
        .collect();

    Ok(RenditionSet {
        original,
        renditions,
    })
}

fn produce_rendition(
    backend: &impl ImageBackend,
    store: &RenditionStore,
    source: &DecodedImage,
    rendition: PlannedRendition,
    format: ImageFormat,
    quality: Quality,
    upload_id: Uuid,
) -> Result<StoredLocation, RenditionError> {
    let scaled = backend.rescale(source, rendition.width, rendition.height)?;
    let bytes = backend.encode(&scaled, format, quality)?;
    let location = store.store(
        &bytes,
        RenditionClass::Width(rendition.width),
        upload_id,
        format.extension(),
    )?;
    Ok(location)
}
