//! Raster image work — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory_with_format` |
//! | **Rescale** | `image::DynamicImage::resize_exact` (bilinear) |
//! | **Encode** | `image` codecs (JPEG at fixed quality) |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`] — the fixed lossy encoding level
//! - **Backend**: [`ImageBackend`] trait + shared [`DecodedImage`] type
//! - **RasterBackend**: the production `image`-crate implementation

pub mod backend;
mod params;
pub mod raster_backend;

pub use backend::{DecodeError, DecodedImage, EncodeError, ImageBackend, RescaleError};
pub use params::Quality;
pub use raster_backend::RasterBackend;
