//! The image editing session.
//!
//! An [`EditSession`] owns the image being edited. It starts empty; loading
//! an image stores two buffers:
//!
//! - **original**: the buffer as decoded, never modified afterwards
//! - **current**: the result of the latest edit, what gets previewed and saved
//!
//! Crop, resize, flip and combine compose onto `current`. Binarization is
//! the exception: it always re-derives from `original`, so a threshold
//! control can be dragged back and forth without compounding. A consequence
//! is that edits made before a binarize call are discarded by it; a crop
//! followed by binarize yields the full uncropped frame.
//!
//! Every operation either succeeds completely or leaves the session exactly
//! as it was.
//!
//! # Example
//!
//! ```ignore
//! use pixelsmith_core::{EditSession, FlipAxis, SaveFormat};
//!
//! let mut session = EditSession::new();
//! session.load("photo.png")?;
//! session.crop(10, 10, 200, 120)?;
//! session.flip(FlipAxis::Horizontal)?;
//! session.set_save_format(SaveFormat::Jpeg);
//! session.save("photo-edited.jpeg", Some(85))?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::config::EditorConfig;
use crate::decode::{
    self, format_tag, kibibytes, DecodeError, DecodedImage, ExifSummary, ImageInfo,
};
use crate::encode::{self, EncodeError, SaveFormat};
use crate::transform::{self, CombineMode, FlipAxis, TransformError};

/// Errors returned by session operations.
///
/// All of them are recoverable: the session keeps its last valid state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs a loaded image.
    #[error("No image loaded")]
    NoImage,

    /// The image could not be decoded.
    #[error("Unable to load image: {0}")]
    Load(#[from] DecodeError),

    /// A parameter is malformed or out of its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JPEG output was requested without a quality value.
    #[error("Compression level not set, image not saved")]
    QualityRequired,

    /// The encoder rejected the current buffer for the requested format.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] EncodeError),

    /// The encoded bytes could not be written.
    #[error("Failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<TransformError> for SessionError {
    fn from(err: TransformError) -> Self {
        SessionError::InvalidArgument(err.to_string())
    }
}

/// Everything tied to one loaded image. Replaced wholesale on load.
#[derive(Debug, Clone)]
struct LoadedImage {
    original: DynamicImage,
    current: DynamicImage,
    source_path: Option<PathBuf>,
    source_format: ImageFormat,
    file_size: u64,
    exif: ExifSummary,
    threshold_level: Option<u8>,
}

impl LoadedImage {
    fn new(decoded: DecodedImage, source_path: Option<PathBuf>) -> Self {
        Self {
            current: decoded.image.clone(),
            original: decoded.image,
            source_path,
            source_format: decoded.format,
            file_size: decoded.file_size,
            exif: decoded.exif,
            threshold_level: None,
        }
    }
}

/// Stateful holder of the image being edited and the chosen save format.
#[derive(Debug, Clone)]
pub struct EditSession {
    config: EditorConfig,
    save_format: SaveFormat,
    loaded: Option<LoadedImage>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create an empty session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty session.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            save_format: config.default_save_format,
            config,
            loaded: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The buffer as first decoded.
    pub fn original(&self) -> Option<&DynamicImage> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    /// The result of the latest edit.
    pub fn current(&self) -> Option<&DynamicImage> {
        self.loaded.as_ref().map(|l| &l.current)
    }

    /// Path the image was loaded from, absent for in-memory loads.
    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().and_then(|l| l.source_path.as_deref())
    }

    /// Cutoff of the last binarization, if binarize has run since load.
    pub fn threshold_level(&self) -> Option<u8> {
        self.loaded.as_ref().and_then(|l| l.threshold_level)
    }

    pub fn save_format(&self) -> SaveFormat {
        self.save_format
    }

    /// Choose the format used by [`encode_selected`](Self::encode_selected)
    /// and [`save`](Self::save). Allowed with or without a loaded image.
    pub fn set_save_format(&mut self, format: SaveFormat) {
        tracing::debug!(%format, "save format selected");
        self.save_format = format;
    }

    fn loaded(&self) -> Result<&LoadedImage, SessionError> {
        self.loaded.as_ref().ok_or(SessionError::NoImage)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedImage, SessionError> {
        self.loaded.as_mut().ok_or(SessionError::NoImage)
    }

    // ------------------------------------------------------------------
    // Loading and metadata
    // ------------------------------------------------------------------

    /// Load an image file, discarding any previous image and its edits.
    ///
    /// # Errors
    ///
    /// `SessionError::Load` if the path is missing, not a file, or not a
    /// decodable image. The session is unchanged on failure.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&DynamicImage, SessionError> {
        let path = path.as_ref();
        let decoded = decode::decode_file(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load image");
            e
        })?;

        tracing::debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            format = ?decoded.format,
            "image loaded"
        );

        let loaded = self
            .loaded
            .insert(LoadedImage::new(decoded, Some(path.to_path_buf())));
        Ok(&loaded.current)
    }

    /// Load an image from an in-memory buffer, e.g. a dropped payload.
    ///
    /// The reported file size is the buffer length.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&DynamicImage, SessionError> {
        let decoded = decode::decode_bytes(bytes).map_err(|e| {
            tracing::warn!(len = bytes.len(), error = %e, "failed to load image bytes");
            e
        })?;

        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            format = ?decoded.format,
            "image loaded from memory"
        );

        let loaded = self.loaded.insert(LoadedImage::new(decoded, None));
        Ok(&loaded.current)
    }

    /// Report size of the current buffer plus facts about its source file.
    pub fn describe(&self) -> Result<ImageInfo, SessionError> {
        let loaded = self.loaded()?;
        Ok(ImageInfo {
            width: loaded.current.width(),
            height: loaded.current.height(),
            format: format_tag(loaded.source_format),
            file_size_kib: kibibytes(loaded.file_size),
            orientation: loaded.exif.orientation,
            camera_make: loaded.exif.camera_make.clone(),
            camera_model: loaded.exif.camera_model.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Transformations
    // ------------------------------------------------------------------

    /// Replace `current` with a black/white rendering of `original`.
    ///
    /// Pixels whose luminance is strictly above `threshold` become white.
    /// Always derived from `original`, never from the previous result.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidArgument` if `threshold` is outside 0-255.
    pub fn binarize(&mut self, threshold: i32) -> Result<&DynamicImage, SessionError> {
        let loaded = self.loaded_mut()?;
        let (binarized, cutoff) = transform::apply_threshold(&loaded.original, threshold)?;

        loaded.current = binarized;
        loaded.threshold_level = Some(cutoff);
        tracing::debug!(threshold, "binarized from original");
        Ok(&loaded.current)
    }

    /// Crop `current` to the pixel rectangle `[left, right) x [top, bottom)`.
    ///
    /// `original` is not touched, so a later binarize starts from the
    /// uncropped image again.
    pub fn crop(
        &mut self,
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
    ) -> Result<&DynamicImage, SessionError> {
        let loaded = self.loaded_mut()?;
        loaded.current = transform::apply_crop(&loaded.current, left, top, right, bottom)?;

        tracing::debug!(left, top, right, bottom, "cropped");
        Ok(&loaded.current)
    }

    /// Resample `current` to exactly `width x height`.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<&DynamicImage, SessionError> {
        let filter = self.config.resize_filter;
        let loaded = self.loaded_mut()?;
        loaded.current = transform::resize(&loaded.current, width, height, filter)?;

        tracing::debug!(width, height, ?filter, "resized");
        Ok(&loaded.current)
    }

    /// Mirror `current` along `axis`.
    pub fn flip(&mut self, axis: FlipAxis) -> Result<&DynamicImage, SessionError> {
        let loaded = self.loaded_mut()?;
        loaded.current = transform::apply_flip(&loaded.current, axis);

        tracing::debug!(?axis, "flipped");
        Ok(&loaded.current)
    }

    /// Combine `current` with `other`. `other` is only read.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidArgument` for an overlay of differently sized
    /// images.
    pub fn combine(
        &mut self,
        other: &DynamicImage,
        mode: CombineMode,
    ) -> Result<&DynamicImage, SessionError> {
        let loaded = self.loaded_mut()?;
        loaded.current = transform::apply_combine(&loaded.current, other, mode)?;

        tracing::debug!(
            %mode,
            width = loaded.current.width(),
            height = loaded.current.height(),
            "combined"
        );
        Ok(&loaded.current)
    }

    /// [`combine`](Self::combine) with the mode given as text
    /// (`"side"`, `"side-by-side"` or `"overlay"`).
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidArgument` for any other mode name.
    pub fn combine_by_name(
        &mut self,
        other: &DynamicImage,
        mode: &str,
    ) -> Result<&DynamicImage, SessionError> {
        self.loaded()?;
        let mode: CombineMode = mode.parse()?;
        self.combine(other, mode)
    }

    /// [`combine`](Self::combine) with a second image decoded from disk.
    pub fn combine_with_file(
        &mut self,
        path: impl AsRef<Path>,
        mode: CombineMode,
    ) -> Result<&DynamicImage, SessionError> {
        self.loaded()?;
        let other = decode::decode_file(path.as_ref())?;
        self.combine(&other.image, mode)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Encode `current` as `format`.
    ///
    /// `quality` (1-100) is required for JPEG and ignored otherwise.
    ///
    /// # Errors
    ///
    /// - `SessionError::QualityRequired` for JPEG without a quality
    /// - `SessionError::InvalidArgument` for a JPEG quality outside 1-100
    /// - `SessionError::Encode` if the encoder rejects the buffer
    pub fn encode(&self, format: SaveFormat, quality: Option<u8>) -> Result<Vec<u8>, SessionError> {
        let loaded = self.loaded()?;

        if format.uses_quality() {
            let level = quality.ok_or(SessionError::QualityRequired)?;
            if !(1..=100).contains(&level) {
                return Err(SessionError::InvalidArgument(format!(
                    "{format} quality {level} is outside 1-100"
                )));
            }
        }
        let bytes = encode::encode_image(&loaded.current, format, quality)?;

        tracing::debug!(%format, ?quality, len = bytes.len(), "encoded");
        Ok(bytes)
    }

    /// [`encode`](Self::encode) using the selected save format.
    pub fn encode_selected(&self, quality: Option<u8>) -> Result<Vec<u8>, SessionError> {
        self.encode(self.save_format, quality)
    }

    /// Encode `current` with the selected save format and write it to `path`.
    ///
    /// Nothing is written when encoding fails.
    pub fn save(&self, path: impl AsRef<Path>, quality: Option<u8>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let bytes = self.encode_selected(quality)?;

        fs::write(path, &bytes).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to save image");
            SessionError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!(path = %path.display(), format = %self.save_format, "image saved");
        Ok(())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
