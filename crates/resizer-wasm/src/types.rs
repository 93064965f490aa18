//! WASM-compatible wrapper types and conversions.
//!
//! This module provides JavaScript-friendly types that wrap the core resizer
//! types, and the helpers that move configs, transforms and errors across the
//! JS boundary.

use std::fmt::Display;

use resizer_core::{FrameConfig, SourceImage, ViewportTransform};
use wasm_bindgen::prelude::*;

/// A decoded source image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order),
    ///   e.g. `ImageData.data` from a canvas
    ///
    /// # Errors
    /// Returns an error if the buffer length does not match the dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(js_error(format!(
                "Invalid pixel data: expected {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(JsSourceImage {
            inner: SourceImage::new(width, height, pixels),
        })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_source(&self) -> &SourceImage {
        &self.inner
    }

    pub(crate) fn to_source(&self) -> SourceImage {
        self.inner.clone()
    }
}

/// Convert any displayable error into a JavaScript `Error`.
pub(crate) fn js_error(message: impl Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Read a frame config from a JS object; `undefined`/`null` mean defaults.
pub(crate) fn parse_config(value: JsValue) -> Result<FrameConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(FrameConfig::default());
    }
    let config: FrameConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_error(format!("Invalid config: {e}")))?;
    config.validate().map_err(js_error)?;
    Ok(config)
}

/// Read a `{ scale, offset: { x, y } }` object.
pub(crate) fn parse_transform(value: JsValue) -> Result<ViewportTransform, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(format!("Invalid transform: {e}")))
}

/// Write a transform as a `{ scale, offset: { x, y } }` object.
pub(crate) fn transform_to_js(transform: &ViewportTransform) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(transform).map_err(js_error)
}

/// Expand an opaque RGB buffer to RGBA for `ImageData`.
pub(crate) fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_source_image_wraps_core() {
        let img = JsSourceImage::from_source(SourceImage::new(4, 2, vec![7u8; 32]));
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 32);
        assert_eq!(img.pixels(), vec![7u8; 32]);
    }

    #[test]
    fn test_js_source_image_valid_constructor() {
        let img = JsSourceImage::new(2, 2, vec![0u8; 16]).ok().unwrap();
        assert_eq!(img.to_source().pixel_count(), 4);
        assert_eq!(img.as_source().width, 2);
    }

    #[test]
    fn test_rgb_to_rgba() {
        assert_eq!(
            rgb_to_rgba(&[1, 2, 3, 4, 5, 6]),
            vec![1, 2, 3, 255, 4, 5, 6, 255]
        );
        assert!(rgb_to_rgba(&[]).is_empty());
    }
}
