//! Export renderer: the final square PNG and the on-screen preview.
//!
//! Export composes the source image under the current transform onto an
//! opaque `T x T` surface and encodes it losslessly. The output depends only
//! on `(image, transform, config)`, so repeated exports are byte-identical.

use image::RgbImage;
use thiserror::Error;

use crate::config::{FrameConfig, MAX_FRAME_SIZE};
use crate::decode::SourceImage;
use crate::encode::{encode_png, EncodeError};
use crate::render::composite;
use crate::viewport::ViewportTransform;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested surface is empty or larger than the maximum frame size.
    #[error("Invalid target size: {0} (must be in 1..=16384)")]
    InvalidTargetSize(u32),

    /// The scale is zero, negative or not finite.
    #[error("Invalid transform: scale {0} must be positive")]
    InvalidTransform(f64),

    /// The source buffer does not match its dimensions.
    #[error("Malformed source image: {width}x{height} with {len} bytes")]
    MalformedSource { width: u32, height: u32, len: usize },

    /// Encoding the surface failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// A finished export, ready to hand to the browser as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    /// Suggested download name, e.g. `resized-image-1024x1024.png`.
    pub file_name: String,
    /// Side length of the exported square.
    pub size: u32,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// MIME type of the exported bytes.
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

/// Download name for an export of side length `size`.
pub fn export_file_name(size: u32) -> String {
    format!("resized-image-{size}x{size}.png")
}

/// Render the `T x T` export surface without encoding it.
pub fn render_frame(
    image: &SourceImage,
    transform: &ViewportTransform,
    config: &FrameConfig,
) -> Result<RgbImage, ExportError> {
    render_at(image, transform, config.target_size, config)
}

/// Render and encode the export.
#[tracing::instrument(skip_all, fields(size = config.target_size, scale = transform.scale))]
pub fn export_png(
    image: &SourceImage,
    transform: &ViewportTransform,
    config: &FrameConfig,
) -> Result<ExportedFile, ExportError> {
    let frame = render_frame(image, transform, config)?;
    let (width, height) = frame.dimensions();
    let bytes = encode_png(frame.as_raw(), width, height)?;

    tracing::debug!(bytes = bytes.len(), "exported frame");
    Ok(ExportedFile {
        file_name: export_file_name(config.target_size),
        size: config.target_size,
        bytes,
    })
}

/// Render the composition at display size for the on-screen preview.
///
/// The transform is rescaled by `D / T`, so the preview shows exactly what
/// the export will contain.
pub fn render_preview(
    image: &SourceImage,
    transform: &ViewportTransform,
    config: &FrameConfig,
) -> Result<RgbImage, ExportError> {
    let size = config.display_size.round().max(1.0) as u32;
    let factor = size as f64 / config.target();
    render_at(image, &transform.scaled_by(factor), size, config)
}

fn render_at(
    image: &SourceImage,
    transform: &ViewportTransform,
    size: u32,
    config: &FrameConfig,
) -> Result<RgbImage, ExportError> {
    if size == 0 || size > MAX_FRAME_SIZE {
        return Err(ExportError::InvalidTargetSize(size));
    }
    if !(transform.scale.is_finite() && transform.scale > 0.0) {
        return Err(ExportError::InvalidTransform(transform.scale));
    }
    if image.is_empty() || !image.is_well_formed() {
        return Err(ExportError::MalformedSource {
            width: image.width,
            height: image.height,
            len: image.pixels.len(),
        });
    }

    Ok(composite(
        image,
        transform,
        size,
        config.background,
        config.filter,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
