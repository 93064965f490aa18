//! Resizer Core - square crop/zoom/export library
//!
//! This crate provides the non-UI core of the 1024x1024 resizer: decoding an
//! uploaded image, the viewport transform the user manipulates by dragging and
//! zooming, and the renderer that exports the framed result as a PNG.
//!
//! # Module Structure
//!
//! - `config` - Target frame size, display size and zoom limits
//! - `decode` - Format sniffing, EXIF orientation, RGBA decoding
//! - `viewport` - Cover fit, drag and zoom operations on the transform
//! - `render` - Compositing the source onto an opaque square surface
//! - `encode` - Lossless PNG encoding
//! - `export` - Export and preview rendering
//! - `session` - Single-image session state for UI bindings
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod render;
pub mod session;
pub mod viewport;

pub use config::{ConfigError, FrameConfig, InterpolationFilter, MAX_FRAME_SIZE};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use export::{export_file_name, export_png, render_preview, ExportError, ExportedFile};
pub use session::{ExportRequest, Session};
pub use viewport::{DragAnchor, Point, ViewportTransform};
