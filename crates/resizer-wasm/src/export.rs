//! Stateless export WASM bindings.
//!
//! These functions take everything they need as arguments, so a Web Worker
//! can render and encode the export while the main thread keeps handling
//! pointer and wheel input.
//!
//! # Functions
//!
//! - [`cover_transform`] - Initial "cover" transform for an image
//! - [`render_export`] - Render and encode the square PNG
//! - [`render_preview`] - Render the display-size preview as RGBA
//! - [`export_file_name`] - Download name for a given target size
//!
//! # Example
//!
//! ```typescript
//! // In the worker
//! const png = render_export(image, transform, { target_size: 1024 });
//! postMessage({ png, name: export_file_name(1024) }, [png.buffer]);
//! ```

use crate::types::{
    js_error, parse_config, parse_transform, rgb_to_rgba, transform_to_js, JsSourceImage,
};
use resizer_core::{export, ViewportTransform};
use wasm_bindgen::prelude::*;

/// Cover-fit transform of a `width x height` image into a `target_size` square.
///
/// Returns `{ scale, offset: { x, y } }`.
#[wasm_bindgen]
pub fn cover_transform(width: u32, height: u32, target_size: u32) -> Result<JsValue, JsValue> {
    if width == 0 || height == 0 || target_size == 0 {
        return Err(js_error("Dimensions must be non-zero"));
    }
    transform_to_js(&ViewportTransform::cover(width, height, target_size as f64))
}

/// Render `image` under `transform` and encode the square PNG.
///
/// # Arguments
///
/// * `image` - Decoded source image
/// * `transform` - `{ scale, offset: { x, y } }` in target pixels
/// * `config` - Optional frame config object; `undefined` for 1024x1024
///
/// # Returns
///
/// PNG bytes as a `Uint8Array`.
#[wasm_bindgen]
pub fn render_export(
    image: &JsSourceImage,
    transform: JsValue,
    config: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let transform = parse_transform(transform)?;
    let config = parse_config(config)?;
    export::export_png(image.as_source(), &transform, &config)
        .map(|file| file.bytes)
        .map_err(js_error)
}

/// Render the preview at display size as RGBA, ready for `new ImageData(...)`.
#[wasm_bindgen]
pub fn render_preview(
    image: &JsSourceImage,
    transform: JsValue,
    config: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let transform = parse_transform(transform)?;
    let config = parse_config(config)?;
    let preview =
        export::render_preview(image.as_source(), &transform, &config).map_err(js_error)?;
    Ok(rgb_to_rgba(preview.as_raw()))
}

/// Download name for an export of side length `size`.
#[wasm_bindgen]
pub fn export_file_name(size: u32) -> String {
    export::export_file_name(size)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use resizer_core::{FrameConfig, Point, SourceImage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn image() -> JsSourceImage {
        JsSourceImage::from_source(SourceImage::from_rgb(8, 4, &[90u8; 8 * 4 * 3]))
    }

    fn small_config() -> JsValue {
        let config = FrameConfig {
            target_size: 16,
            display_size: 8.0,
            ..FrameConfig::default()
        };
        serde_wasm_bindgen::to_value(&config).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_cover_transform() {
        let value = cover_transform(2000, 1000, 1024).unwrap();
        let t: ViewportTransform = serde_wasm_bindgen::from_value(value).unwrap();
        assert!((t.scale - 1.024).abs() < 1e-12);
        assert!((t.offset.x + 512.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_cover_transform_zero_errors() {
        assert!(cover_transform(0, 10, 1024).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_export_png_signature() {
        let t = transform_to_js(&ViewportTransform::cover(8, 4, 16.0)).unwrap();
        let png = render_export(&image(), t, small_config()).unwrap();
        assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);
    }

    #[wasm_bindgen_test]
    fn test_render_export_deterministic() {
        let t = ViewportTransform::new(1.3, Point::new(-2.0, 3.0));
        let a = render_export(&image(), transform_to_js(&t).unwrap(), small_config()).unwrap();
        let b = render_export(&image(), transform_to_js(&t).unwrap(), small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[wasm_bindgen_test]
    fn test_render_preview_rgba_size() {
        let t = transform_to_js(&ViewportTransform::cover(8, 4, 16.0)).unwrap();
        let rgba = render_preview(&image(), t, small_config()).unwrap();
        assert_eq!(rgba.len(), 8 * 8 * 4);
        assert!(rgba.chunks(4).all(|p| p == [90, 90, 90, 255]));
    }

    #[wasm_bindgen_test]
    fn test_render_export_bad_transform() {
        let bad = serde_wasm_bindgen::to_value(&"nope").unwrap();
        assert!(render_export(&image(), bad, JsValue::UNDEFINED).is_err());
    }
}
