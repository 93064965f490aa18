//! Image decoding WASM bindings.
//!
//! Stateless decoding for use from a Web Worker: the worker decodes the
//! uploaded file and posts the pixels back, and the main thread hands them
//! to [`crate::session::JsResizer::load_image`].
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an uploaded file (JPEG, PNG, GIF, WebP, BMP)
//! - [`get_orientation`] - Read the EXIF orientation tag
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@resizer/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{js_error, JsSourceImage};
use resizer_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image file.
///
/// The format is sniffed from the content and EXIF orientation is applied,
/// so `width`/`height` match what the browser shows for the same file.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a recognized format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(js_error)
}

/// Read the EXIF orientation (1-8) from image bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0x00, 0x01, 0x02, 0x03]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }
}
