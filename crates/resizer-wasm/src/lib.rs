//! Resizer WASM - WebAssembly bindings for the 1024x1024 resizer
//!
//! This crate exposes the resizer-core functionality to a JavaScript UI shell.
//!
//! # Module Structure
//!
//! - `session` - `JsResizer`, the stateful object the UI drives with events
//! - `types` - WASM-compatible wrapper types and JS conversions
//! - `decode` - Stateless decoding, for use from a Web Worker
//! - `export` - Stateless export and preview rendering, for use from a Web Worker
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsResizer } from '@resizer/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const resizer = new JsResizer(undefined);
//! resizer.load(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Zoom ${resizer.scale_percent}%`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod export;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_image, get_orientation};
pub use export::{cover_transform, export_file_name, render_export, render_preview};
pub use session::{JsExportJob, JsResizer};
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "resizer-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
