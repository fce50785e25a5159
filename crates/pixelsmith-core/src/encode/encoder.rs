//! Byte encoding for every supported save format.
//!
//! Encoders come from the `image` crate. Each one decides which color types
//! it accepts; a rejected buffer surfaces as `EncodeError::EncodingFailed`.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use thiserror::Error;

use super::SaveFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Cannot encode an empty {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },

    /// A lossy format was requested without a quality value
    #[error("{format} output needs a quality setting")]
    QualityRequired { format: SaveFormat },

    /// The encoder rejected the buffer
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: SaveFormat, message: String },
}

/// Encode an image as baseline JPEG at `quality` (clamped to 1-100).
///
/// Buffers the encoder cannot represent, such as 16-bit samples, are
/// rejected.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_image(image, SaveFormat::Jpeg, Some(quality))
}

/// Encode an image in `format`.
///
/// `quality` is read only by formats where [`SaveFormat::uses_quality`]
/// holds; those have no default and fail without one.
pub fn encode_image(
    image: &DynamicImage,
    format: SaveFormat,
    quality: Option<u8>,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let pixels = image.as_bytes();
    let color: ExtendedColorType = image.color().into();
    let mut buffer = Cursor::new(Vec::new());

    let result = match format {
        SaveFormat::Jpeg => {
            let quality = quality.ok_or(EncodeError::QualityRequired { format })?;
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .write_image(pixels, width, height, color)
        }
        SaveFormat::Png => PngEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        SaveFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        SaveFormat::Tiff => TiffEncoder::new(&mut buffer).write_image(pixels, width, height, color),
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
