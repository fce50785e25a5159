//! Image encoding for Pixelsmith.
//!
//! This module provides functionality for:
//! - Selecting an output format from the fixed set (JPEG, PNG, BMP, TIFF)
//! - Encoding a pixel buffer to bytes, with configurable JPEG quality
//!
//! Encoding is a pure derivation: the source buffer is only read.

mod encoder;
mod format;

pub use encoder::{encode_image, encode_jpeg, EncodeError};
pub use format::{SaveFormat, UnknownFormat};
