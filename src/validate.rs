//! Upload policy checks.
//!
//! [`validate`] runs before any decode work: cheap structural checks (title,
//! payload size) first, format sniffing last, so obviously-invalid payloads
//! never pay for inspection. Each check fails independently with its own
//! [`ValidationError`] variant, which the calling layer maps to a
//! client-facing rejection.

use crate::format::{self, ImageFormat};
use thiserror::Error;

/// Minimum title length in characters.
pub const MIN_TITLE_LEN: usize = 1;
/// Payloads must be strictly larger than this many bytes.
pub const MIN_MEDIA_BYTES: usize = 32;
/// Payloads must be strictly smaller than this many bytes.
pub const MAX_MEDIA_BYTES: usize = 8_000_000;

/// One upload as handed over by the post-creation collaborator.
///
/// Owned exclusively by a single pipeline invocation; never shared across
/// requests. `description` is carried for the caller's post record and plays
/// no role in processing.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    pub media_bytes: Vec<u8>,
    pub declared_content_type: Option<String>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must be at least {} character long", MIN_TITLE_LEN)]
    TitleTooShort,
    #[error("media payload must be larger than {} bytes", MIN_MEDIA_BYTES)]
    PayloadTooSmall,
    #[error("media payload must be smaller than {} bytes", MAX_MEDIA_BYTES)]
    PayloadTooLarge,
    #[error("unsupported media type")]
    UnsupportedMediaType,
}

/// Apply upload policy and resolve the format, in that order.
///
/// No side effects; the resolved [`ImageFormat`] is fixed for the rest of
/// the pipeline.
pub fn validate(request: &UploadRequest) -> Result<ImageFormat, ValidationError> {
    if request.title.chars().count() < MIN_TITLE_LEN {
        return Err(ValidationError::TitleTooShort);
    }
    if request.media_bytes.len() <= MIN_MEDIA_BYTES {
        return Err(ValidationError::PayloadTooSmall);
    }
    if request.media_bytes.len() >= MAX_MEDIA_BYTES {
        return Err(ValidationError::PayloadTooLarge);
    }

    let format = format::classify(
        request.declared_content_type.as_deref(),
        &request.media_bytes,
    );
    if format == ImageFormat::Unknown {
        return Err(ValidationError::UnsupportedMediaType);
    }
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, bytes: Vec<u8>, content_type: Option<&str>) -> UploadRequest {
        UploadRequest {
            title: title.to_string(),
            description: String::new(),
            media_bytes: bytes,
            declared_content_type: content_type.map(str::to_string),
        }
    }

    fn jpeg_payload(len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        if let Some(first) = bytes.first_mut() {
            *first = 0xFF;
        }
        bytes
    }

    #[test]
    fn empty_title_rejected() {
        let req = request("", jpeg_payload(100), Some("image/jpeg"));
        assert_eq!(validate(&req), Err(ValidationError::TitleTooShort));
    }

    #[test]
    fn title_check_runs_before_size_checks() {
        // Both title and payload are invalid; the title check fires first.
        let req = request("", vec![], None);
        assert_eq!(validate(&req), Err(ValidationError::TitleTooShort));
    }

    #[test]
    fn exactly_min_size_payload_rejected() {
        let req = request("A", jpeg_payload(MIN_MEDIA_BYTES), Some("image/jpeg"));
        assert_eq!(validate(&req), Err(ValidationError::PayloadTooSmall));
    }

    #[test]
    fn payload_one_over_min_of_unknown_format_rejected() {
        let req = request("A", vec![0u8; MIN_MEDIA_BYTES + 1], None);
        assert_eq!(validate(&req), Err(ValidationError::UnsupportedMediaType));
    }

    #[test]
    fn max_size_payload_rejected() {
        let req = request("A", jpeg_payload(MAX_MEDIA_BYTES), Some("image/jpeg"));
        assert_eq!(validate(&req), Err(ValidationError::PayloadTooLarge));
    }

    #[test]
    fn size_checks_run_before_sniffing() {
        // Unknown format *and* oversized; size wins because sniffing is last.
        let req = request("A", vec![0u8; MAX_MEDIA_BYTES], None);
        assert_eq!(validate(&req), Err(ValidationError::PayloadTooLarge));
    }

    #[test]
    fn valid_jpeg_request_resolves_format() {
        let req = request("A", jpeg_payload(100), Some("image/jpeg"));
        assert_eq!(validate(&req), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn valid_request_without_header_sniffs_payload() {
        let req = request("A", jpeg_payload(100), None);
        assert_eq!(validate(&req), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn one_character_title_accepted() {
        let req = request("A", jpeg_payload(MIN_MEDIA_BYTES + 1), Some("image/jpeg"));
        assert_eq!(validate(&req), Ok(ImageFormat::Jpeg));
    }
}
