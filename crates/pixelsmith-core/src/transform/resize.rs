//! Exact-size resampling.

use image::DynamicImage;

use super::{fits_allocation, TransformError};
use crate::decode::FilterType;

/// Resample `image` to exactly `width x height`.
///
/// Aspect ratio is not preserved; the output is always `width x height`.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if either dimension is not
/// a positive value that fits in `u32`, or the output buffer would exceed
/// the default allocation limit.
pub fn resize(
    image: &DynamicImage,
    width: i64,
    height: i64,
    filter: FilterType,
) -> Result<DynamicImage, TransformError> {
    let invalid = || TransformError::InvalidDimensions { width, height };

    if width <= 0 || height <= 0 {
        return Err(invalid());
    }
    let target_width = u32::try_from(width).map_err(|_| invalid())?;
    let target_height = u32::try_from(height).map_err(|_| invalid())?;
    if !fits_allocation(image.color(), target_width, target_height) {
        return Err(invalid());
    }

    // Same size: nothing to resample
    if image.width() == target_width && image.height() == target_height {
        return Ok(image.clone());
    }

    Ok(image.resize_exact(target_width, target_height, filter.to_image_filter()))
}
