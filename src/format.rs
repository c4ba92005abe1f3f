//! Image format classification ("sniffing").
//!
//! Uploads arrive as opaque byte blobs with an optional declared
//! content-type. [`classify`] resolves them to an [`ImageFormat`] using two
//! sources, in order:
//!
//! 1. The declared content-type, matched exactly against a small lookup
//!    table. A correct header short-circuits payload inspection.
//! 2. The leading magic byte of the payload, when the header is missing or
//!    maps to nothing we support.
//!
//! Both misses (or an empty payload) yield [`ImageFormat::Unknown`], which is
//! never a valid state for processing to continue — the validator rejects it.

use std::fmt;

/// Content-type strings we accept, paired with their formats.
const CONTENT_TYPES: &[(&str, ImageFormat)] = &[
    ("image/jpeg", ImageFormat::Jpeg),
    ("image/jpg", ImageFormat::Jpeg),
    ("image/png", ImageFormat::Png),
    ("image/gif", ImageFormat::Gif),
    ("image/tiff", ImageFormat::Tiff),
];

/// The closed set of formats the pipeline can carry end-to-end.
///
/// A format is fixed once per upload at sniff time and never re-derived
/// mid-pipeline. The enum is deliberately closed (not stringly typed) so
/// encode/decode dispatch stays exhaustiveness-checked as formats are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Unknown,
    Jpeg,
    Png,
    Gif,
    Tiff,
}

impl ImageFormat {
    /// Classify from a declared content-type string.
    pub fn from_content_type(content_type: &str) -> Self {
        CONTENT_TYPES
            .iter()
            .find(|(name, _)| *name == content_type)
            .map(|(_, format)| *format)
            .unwrap_or(ImageFormat::Unknown)
    }

    /// Classify from the payload's leading magic byte.
    ///
    /// TIFF has two signatures (`II` little-endian, `MM` big-endian), hence
    /// the two leading bytes mapping to one format.
    pub fn from_magic(bytes: &[u8]) -> Self {
        match bytes.first() {
            Some(0xFF) => ImageFormat::Jpeg,
            Some(0x89) => ImageFormat::Png,
            Some(0x47) => ImageFormat::Gif,
            Some(0x49) | Some(0x4D) => ImageFormat::Tiff,
            _ => ImageFormat::Unknown,
        }
    }

    /// Canonical file extension used in stored rendition paths.
    ///
    /// Empty for `Unknown`, which never reaches the store stage.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Unknown => "",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Unknown => "unknown",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Tiff => "TIFF",
        };
        f.write_str(name)
    }
}

/// Resolve an upload's format from its declared content-type and payload.
///
/// Declared content-type takes precedence over sniffing: a correct header
/// skips payload inspection entirely, while a wrong or missing header falls
/// back to the magic byte. Pure function, no I/O.
pub fn classify(declared_content_type: Option<&str>, media_bytes: &[u8]) -> ImageFormat {
    let from_header = declared_content_type
        .map(ImageFormat::from_content_type)
        .unwrap_or(ImageFormat::Unknown);

    if from_header != ImageFormat::Unknown {
        return from_header;
    }
    ImageFormat::from_magic(media_bytes)
}
