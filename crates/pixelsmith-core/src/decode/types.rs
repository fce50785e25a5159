//! Decoded images and the facts reported about their source.

use std::fmt;
use std::path::PathBuf;

use image::{imageops, DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an image could not be loaded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Content does not match any enabled codec.
    #[error("Unrecognized image format")]
    InvalidFormat,

    /// Recognized container whose pixel data failed to decode.
    #[error("Damaged image data: {0}")]
    CorruptedFile(String),

    #[error("Read failed: {0}")]
    IoError(String),
}

/// Resampling kernel used by resize, selectable from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Nearest,
    Bilinear,
    /// Sharpest result, best suited to downscaling photos.
    #[default]
    Lanczos3,
}

impl FilterType {
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            Self::Nearest => imageops::FilterType::Nearest,
            Self::Bilinear => imageops::FilterType::Triangle,
            Self::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// The EXIF `Orientation` tag as stored by the camera.
///
/// Reported only; pixels are kept in their stored layout. Values outside
/// 1-8 read as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    MirrorHorizontal = 2,
    UpsideDown = 3,
    MirrorVertical = 4,
    MirrorHorizontalRotateLeft = 5,
    RotateRight = 6,
    MirrorHorizontalRotateRight = 7,
    RotateLeft = 8,
}

impl From<u32> for Orientation {
    fn from(tag: u32) -> Self {
        const TABLE: [Orientation; 8] = [
            Orientation::Normal,
            Orientation::MirrorHorizontal,
            Orientation::UpsideDown,
            Orientation::MirrorVertical,
            Orientation::MirrorHorizontalRotateLeft,
            Orientation::RotateRight,
            Orientation::MirrorHorizontalRotateRight,
            Orientation::RotateLeft,
        ];
        tag.checked_sub(1)
            .and_then(|i| TABLE.get(i as usize))
            .copied()
            .unwrap_or_default()
    }
}

/// Best-effort EXIF facts read alongside the pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifSummary {
    pub orientation: Orientation,
    /// `Make` tag, quotes stripped.
    pub camera_make: Option<String>,
    /// `Model` tag, quotes stripped.
    pub camera_model: Option<String>,
}

/// A decoded image together with facts about its source.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Decoded pixel buffer in whatever color type the file carried.
    pub image: DynamicImage,
    /// Container format detected while decoding.
    pub format: ImageFormat,
    /// Size of the encoded source in bytes.
    pub file_size: u64,
    pub exif: ExifSummary,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Metadata reported for the image held by an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width of the current buffer in pixels.
    pub width: u32,
    /// Height of the current buffer in pixels.
    pub height: u32,
    /// Upper-case tag of the source format, e.g. "JPEG".
    pub format: String,
    /// Source file size in kibibytes, rounded to two decimals.
    pub file_size_kib: f64,
    pub orientation: Orientation,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Width: {}px\nHeight: {}px\nFormat: {}\nFile Size: {:.2} KB",
            self.width, self.height, self.format, self.file_size_kib
        )
    }
}

/// Upper-case display tag for a container format.
pub fn format_tag(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

/// Convert a byte count to kibibytes with two-decimal precision.
pub fn kibibytes(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
