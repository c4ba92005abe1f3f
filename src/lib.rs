//! # Darkroom
//!
//! The media ingestion and rendition pipeline of a photo-sharing backend.
//! The surrounding application (HTTP routes, sessions, the post store) hands
//! this crate an uploaded byte blob and gets back the set of stored file
//! locations to embed in the post record; everything between those two
//! points lives here.
//!
//! # Architecture: One Pipeline, Independent Width Units
//!
//! ```text
//! sniff → validate → decode → plan → { rescale → encode → store } per width
//!                                    + one store of the untouched original
//! ```
//!
//! The first three stages are fatal on failure: a rejected or undecodable
//! upload writes nothing. After decode, each target width is an independent
//! unit of work reading one shared, read-only raster — units run in parallel
//! under rayon, and a failing unit only costs that one width. The original
//! write is the exception: every post requires a canonical stored image, so
//! its failure fails the upload.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | Format classification: content-type table + magic-byte fallback |
//! | [`validate`] | Upload policy: title, payload bounds, sniffable format |
//! | [`plan`] | Pure dimension math deciding which widths are producible |
//! | [`imaging`] | Backend seam: decode / rescale / encode over owned rasters |
//! | [`store`] | The `original`/`w{width}` filesystem layout |
//! | [`pipeline`] | Orchestration, [`RenditionSet`], failure policy |
//!
//! # Design Decisions
//!
//! ## Closed Format Enum
//!
//! Supported formats are a closed [`ImageFormat`] enum rather than
//! open-ended string matching. Encode/decode dispatch stays exhaustive, so
//! adding a format is a compile-checked change, and a format is sniffed
//! exactly once per upload and carried unchanged through the pipeline.
//!
//! ## Degrade, Don't Abort
//!
//! A rescale, encode, or store failure for one width is logged (via
//! `tracing`) and that width is simply absent from the returned
//! [`RenditionSet`] — indistinguishable from "source too narrow". Callers
//! get the renditions that exist; resubmission of the whole upload is the
//! only retry path.
//!
//! ## Uniqueness Instead of Locking
//!
//! Concurrent uploads share only the filesystem namespace. Each upload gets
//! one v4 UUID as the filename stem for all of its files; directory creation
//! is idempotent. No in-process locking exists because none is needed.

pub mod format;
pub mod imaging;
pub mod pipeline;
pub mod plan;
pub mod store;
pub mod validate;

pub use format::ImageFormat;
pub use pipeline::{IngestError, PipelineConfig, RenditionSet, ingest, ingest_with_backend};
pub use store::{RenditionStore, StoredLocation};
pub use validate::{UploadRequest, ValidationError};
