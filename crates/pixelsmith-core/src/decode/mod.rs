//! Image decoding for Pixelsmith.
//!
//! This module provides functionality for:
//! - Decoding image files from disk (JPEG, PNG, BMP, TIFF)
//! - Decoding in-memory buffers handed over by drag-and-drop
//! - Reporting source facts: container format, byte size, EXIF orientation
//!   and camera identity
//!
//! Pixel data is kept in the color type the file carried; conversion happens
//! in the transforms that need it.

mod file;
mod types;

pub use file::{decode_bytes, decode_file};
pub use types::{
    format_tag, kibibytes, DecodeError, DecodedImage, ExifSummary, FilterType, ImageInfo,
    Orientation,
};
