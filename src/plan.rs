//! Rendition planning — pure dimension math.
//!
//! Given a decoded image's dimensions and the configured target widths,
//! [`plan_renditions`] decides which renditions are geometrically producible
//! and at what height. No I/O; the returned sequence drives the per-width
//! fan-out in the pipeline, one independent unit of work per entry.

/// Target widths generated for every upload, ascending.
///
/// This set is configuration, not derived data: it matches the widths the
/// client applications request, and the stored-layout subdirectories
/// (`w320` .. `w1125`) are named after it.
pub const DEFAULT_RENDITION_WIDTHS: [u32; 5] = [320, 640, 750, 1080, 1125];

/// One producible rendition: target width plus the aspect-preserving height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRendition {
    pub width: u32,
    pub height: u32,
}

/// Select the producible target widths and compute their heights.
///
/// A target is included only when it is strictly narrower than the source —
/// a rendition at or above the source width would upscale, which the
/// pipeline never does. Heights are `round(source_height * w / source_width)`
/// so the aspect ratio survives within one pixel of rounding. Order follows
/// the input set.
pub fn plan_renditions(
    source_width: u32,
    source_height: u32,
    targets: &[u32],
) -> Vec<PlannedRendition> {
    targets
        .iter()
        .filter(|&&width| width < source_width)
        .map(|&width| {
            let ratio = width as f64 / source_width as f64;
            PlannedRendition {
                width,
                height: (source_height as f64 * ratio).round() as u32,
            }
        })
        .collect()
}
