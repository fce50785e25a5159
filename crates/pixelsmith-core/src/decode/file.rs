//! Decoding images from disk or memory, with format detection and EXIF facts.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};

use super::{DecodeError, DecodedImage, ExifSummary, Orientation};

/// Decode an image file from disk.
///
/// The container format is guessed from the file contents rather than the
/// extension, so a mislabelled file still decodes.
///
/// # Errors
///
/// Returns `DecodeError::NotFound` / `DecodeError::NotAFile` when the path
/// does not name a regular file, `DecodeError::IoError` when it cannot be
/// read, and `DecodeError::InvalidFormat` / `DecodeError::CorruptedFile`
/// when the image library rejects the contents.
pub fn decode_file(path: &Path) -> Result<DecodedImage, DecodeError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DecodeError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(DecodeError::IoError(e.to_string())),
    };

    if !metadata.is_file() {
        return Err(DecodeError::NotAFile(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode_bytes(&bytes)
}

/// Decode an image held in memory.
///
/// The reported file size is the length of `bytes`.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let image = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    Ok(DecodedImage {
        image,
        format,
        file_size: bytes.len() as u64,
        exif: read_exif(bytes),
    })
}

/// Read orientation and camera identity from embedded EXIF.
///
/// Missing or unreadable EXIF yields the defaults.
fn read_exif(bytes: &[u8]) -> ExifSummary {
    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return ExifSummary::default(),
    };

    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default();

    let text_field = |tag: Tag| {
        exif.get_field(tag, In::PRIMARY)
            .map(|field| field.display_value().to_string())
            // Clean up quotes from string values
            .map(|value| value.trim_matches('"').trim().to_string())
            .filter(|value| !value.is_empty())
    };

    ExifSummary {
        orientation,
        camera_make: text_field(Tag::Make),
        camera_model: text_field(Tag::Model),
    }
}
