use thiserror::Error;

/// Rejected transform parameters.
///
/// Every variant means the input image was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Crop rectangle is inverted, empty, disjoint from the image, or too
    /// large to allocate.
    #[error(
        "Invalid crop rectangle ({left}, {top}, {right}, {bottom}) for a {width}x{height} image"
    )]
    InvalidCrop {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        width: u32,
        height: u32,
    },

    /// Target dimensions are non-positive or too large.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Binarization cutoff outside 0-255.
    #[error("Threshold {0} is outside 0-255")]
    InvalidThreshold(i32),

    /// Overlay needs two canvases of the same size.
    #[error("Image sizes differ: {base_width}x{base_height} vs {other_width}x{other_height}")]
    SizeMismatch {
        base_width: u32,
        base_height: u32,
        other_width: u32,
        other_height: u32,
    },

    /// Combine mode name not recognised.
    #[error("Unknown combine mode: {0:?}")]
    UnknownCombineMode(String),
}
