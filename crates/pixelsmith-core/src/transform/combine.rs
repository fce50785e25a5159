//! Combining the working image with a second image.
//!
//! # Modes
//!
//! - **Side by side**: both images copied onto a black RGB canvas, the
//!   second one starting where the first one ends. Heights are not matched
//!   and no alpha blending happens; uncovered area stays black.
//! - **Overlay**: both images converted to RGBA and mixed channel by channel
//!   (alpha included) with a fixed 50% coefficient. Sizes must match.

use std::fmt;
use std::str::FromStr;

use image::{imageops, DynamicImage, GenericImageView, RgbImage};
use serde::{Deserialize, Serialize};

use super::TransformError;

/// Mix coefficient used by [`overlay`].
pub const OVERLAY_ALPHA: f32 = 0.5;

/// How two images are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    SideBySide,
    Overlay,
}

impl FromStr for CombineMode {
    type Err = TransformError;

    /// Accepts `side`, `side-by-side`, `side_by_side` and `overlay`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "side" | "side-by-side" | "side_by_side" | "sidebyside" => {
                Ok(CombineMode::SideBySide)
            }
            "overlay" => Ok(CombineMode::Overlay),
            _ => Err(TransformError::UnknownCombineMode(s.to_string())),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::SideBySide => f.write_str("side-by-side"),
            CombineMode::Overlay => f.write_str("overlay"),
        }
    }
}

/// Combine `base` with `other` using `mode`.
pub fn apply_combine(
    base: &DynamicImage,
    other: &DynamicImage,
    mode: CombineMode,
) -> Result<DynamicImage, TransformError> {
    match mode {
        CombineMode::SideBySide => side_by_side(base, other),
        CombineMode::Overlay => overlay(base, other),
    }
}

/// Place `right` next to `left` on a black RGB canvas.
///
/// Output size is `(w_left + w_right) x max(h_left, h_right)`.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if the combined width
/// overflows `u32`.
pub fn side_by_side(
    left: &DynamicImage,
    right: &DynamicImage,
) -> Result<DynamicImage, TransformError> {
    let left = left.to_rgb8();
    let right = right.to_rgb8();

    let width = left.width().checked_add(right.width()).ok_or_else(|| {
        TransformError::InvalidDimensions {
            width: i64::from(left.width()) + i64::from(right.width()),
            height: i64::from(left.height().max(right.height())),
        }
    })?;
    let height = left.height().max(right.height());

    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, i64::from(left.width()), 0);

    Ok(DynamicImage::ImageRgb8(canvas))
}

/// Mix two equally sized images at [`OVERLAY_ALPHA`].
///
/// Each channel becomes `a + 0.5 * (b - a)`, truncated.
///
/// # Errors
///
/// Returns `TransformError::SizeMismatch` if the images differ in size.
pub fn overlay(base: &DynamicImage, other: &DynamicImage) -> Result<DynamicImage, TransformError> {
    if base.dimensions() != other.dimensions() {
        return Err(TransformError::SizeMismatch {
            base_width: base.width(),
            base_height: base.height(),
            other_width: other.width(),
            other_height: other.height(),
        });
    }

    let mut mixed = base.to_rgba8();
    let top = other.to_rgba8();

    for (dst, src) in mixed.pixels_mut().zip(top.pixels()) {
        for (d, s) in dst.0.iter_mut().zip(src.0.iter()) {
            *d = blend_channel(*d, *s, OVERLAY_ALPHA);
        }
    }

    Ok(DynamicImage::ImageRgba8(mixed))
}

#[inline]
fn blend_channel(a: u8, b: u8, alpha: f32) -> u8 {
    let value = f32::from(a) + alpha * (f32::from(b) - f32::from(a));
    value.clamp(0.0, 255.0) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
