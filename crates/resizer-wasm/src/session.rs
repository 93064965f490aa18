//! Session WASM bindings: the object the UI shell drives.
//!
//! `JsResizer` owns the loaded image and its transform. The UI forwards raw
//! events (pointer/touch coordinates, wheel deltas, slider values, button
//! clicks) and reads back what it needs to draw its controls.
//!
//! # Example
//!
//! ```typescript
//! const resizer = new JsResizer(undefined);
//! resizer.load(new Uint8Array(await file.arrayBuffer()));
//!
//! box.onpointerdown = (e) => resizer.pointer_down(e.clientX, e.clientY);
//! box.onpointermove = (e) => resizer.pointer_move(e.clientX, e.clientY);
//! box.onpointerup = () => resizer.pointer_up();
//! box.onwheel = (e) => resizer.wheel(e.deltaY);
//! slider.oninput = () => resizer.set_scale(parseFloat(slider.value));
//!
//! const png = resizer.export_png();
//! download(new Blob([png], { type: 'image/png' }), resizer.export_file_name);
//! ```

use crate::types::{js_error, parse_config, rgb_to_rgba, transform_to_js, JsSourceImage};
use resizer_core::{export, ExportRequest, Session};
use wasm_bindgen::prelude::*;

/// Interactive resizer session for JavaScript.
#[wasm_bindgen]
pub struct JsResizer {
    inner: Session,
}

#[wasm_bindgen]
impl JsResizer {
    /// Create a session.
    ///
    /// # Arguments
    /// * `config` - Optional frame config object (`target_size`, `display_size`,
    ///   zoom limits, `background`, `filter`); `undefined` for the defaults
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsResizer, JsValue> {
        let config = parse_config(config)?;
        let inner = Session::with_config(config).map_err(js_error)?;
        Ok(JsResizer { inner })
    }

    /// Create a session with the default 1024x1024 frame.
    pub fn with_defaults() -> JsResizer {
        JsResizer {
            inner: Session::new(),
        }
    }

    /// Decode and load an uploaded file.
    ///
    /// On failure the previous image and transform are kept and the error is
    /// also reported to the browser console.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(|e| {
            let message = format!("Could not load image: {e}");
            web_sys::console::warn_1(&JsValue::from_str(&message));
            js_error(message)
        })
    }

    /// Load an image decoded elsewhere (e.g. in a Web Worker).
    pub fn load_image(&mut self, image: &JsSourceImage) {
        self.inner.load_image(image.to_source());
    }

    /// Pointer or touch start at screen coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    /// Pointer or touch move at screen coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    /// Pointer up, touch end or pointer leaving the viewport.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Wheel event with `WheelEvent.deltaY`.
    pub fn wheel(&mut self, delta_y: f64) {
        self.inner.wheel(delta_y);
    }

    /// Zoom slider value.
    pub fn set_scale(&mut self, value: f64) {
        self.inner.set_slider_scale(value);
    }

    /// Restore the initial cover fit.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Whether an image is loaded (enables the controls).
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Whether an export is in flight.
    #[wasm_bindgen(getter)]
    pub fn is_processing(&self) -> bool {
        self.inner.is_processing()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Current scale, for the slider.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale()
    }

    /// Current zoom as a whole percentage, for the slider label.
    #[wasm_bindgen(getter)]
    pub fn scale_percent(&self) -> u32 {
        self.inner.transform().map_or(100, |t| t.scale_percent())
    }

    /// Horizontal offset in target pixels (0 without an image).
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.transform().map_or(0.0, |t| t.offset.x)
    }

    /// Vertical offset in target pixels (0 without an image).
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.transform().map_or(0.0, |t| t.offset.y)
    }

    #[wasm_bindgen(getter)]
    pub fn target_size(&self) -> u32 {
        self.inner.config().target_size
    }

    #[wasm_bindgen(getter)]
    pub fn display_size(&self) -> f64 {
        self.inner.config().display_size
    }

    /// Download name of the export.
    #[wasm_bindgen(getter)]
    pub fn export_file_name(&self) -> String {
        export::export_file_name(self.inner.config().target_size)
    }

    /// Current transform as `{ scale, offset: { x, y } }`, or `null`.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        match self.inner.transform() {
            Some(t) => transform_to_js(&t),
            None => Ok(JsValue::NULL),
        }
    }

    /// Render the display-size preview as RGBA, or `undefined` without an image.
    pub fn render_preview(&self) -> Result<Option<Vec<u8>>, JsValue> {
        let (Some(image), Some(transform)) = (self.inner.image(), self.inner.transform()) else {
            return Ok(None);
        };
        let preview =
            export::render_preview(image, &transform, self.inner.config()).map_err(js_error)?;
        Ok(Some(rgb_to_rgba(preview.as_raw())))
    }

    /// Start an export; `undefined` without an image or while one is running.
    ///
    /// Call `finish_export()` once the job's bytes have been handled.
    pub fn begin_export(&mut self) -> Option<JsExportJob> {
        self.inner
            .begin_export()
            .map(|request| JsExportJob { request })
    }

    /// Clear the processing flag.
    pub fn finish_export(&mut self) {
        self.inner.finish_export();
    }

    /// Render and encode the export synchronously.
    ///
    /// # Errors
    /// Returns an error if no image is loaded, an export is already running,
    /// or encoding fails.
    pub fn export_png(&mut self) -> Result<Vec<u8>, JsValue> {
        match self.inner.export_now() {
            Some(result) => result.map(|file| file.bytes).map_err(js_error),
            None => Err(js_error("No image loaded or export already in progress")),
        }
    }
}

/// A detached export, safe to run after further interaction.
#[wasm_bindgen]
pub struct JsExportJob {
    request: ExportRequest,
}

#[wasm_bindgen]
impl JsExportJob {
    /// Render and encode; returns PNG bytes.
    pub fn run(&self) -> Result<Vec<u8>, JsValue> {
        self.request
            .run()
            .map(|file| file.bytes)
            .map_err(js_error)
    }

    /// Source image, for posting to a Web Worker.
    pub fn image(&self) -> JsSourceImage {
        JsSourceImage::from_source(self.request.image().clone())
    }

    /// Transform snapshot as `{ scale, offset: { x, y } }`.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        transform_to_js(&self.request.transform())
    }
}
