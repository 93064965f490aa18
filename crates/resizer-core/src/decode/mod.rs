//! Image decoding for the resizer.
//!
//! This module turns the bytes of a user-selected file into a [`SourceImage`]:
//! - Format sniffing from content (JPEG, PNG, GIF, WebP, BMP)
//! - EXIF orientation correction, matching how browsers draw an `<img>`
//! - Conversion to straight-alpha RGBA8
//!
//! # Architecture
//!
//! Decoding is a pure function of the input bytes so it can run inside a
//! Web Worker (via the WASM bindings) or on a native worker thread without
//! touching session state.
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod types;

pub use raster::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
