//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding an opaque RGB surface to PNG (lossless, no chroma subsampling)
//!
//! # Architecture
//!
//! Encoding is synchronous and single-threaded. Callers that must keep an
//! interactive thread responsive run it on a worker (see
//! [`crate::session::ExportRequest`]).
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::encode::encode_png;
//!
//! let pixels = vec![255u8; 1024 * 1024 * 3]; // White frame
//! let png_bytes = encode_png(&pixels, 1024, 1024).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
