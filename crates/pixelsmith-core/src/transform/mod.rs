//! Editing transforms applied by the session.
//!
//! Each transform takes the buffer it works on by reference and returns a
//! new buffer, leaving the input untouched. Parameter validation happens
//! before any pixel work, so a rejected call never yields a partial result.
//!
//! # Coordinate System
//!
//! - Crop coordinates are pixel edges: `left`/`top` inclusive,
//!   `right`/`bottom` exclusive
//! - Origin is top-left corner
//!
//! Transforms that allocate a new canvas refuse sizes beyond the image
//! library's default allocation limit.

mod combine;
mod crop;
mod error;
mod flip;
mod resize;
mod threshold;

pub use combine::{apply_combine, overlay, side_by_side, CombineMode, OVERLAY_ALPHA};
pub use crop::apply_crop;
pub use error::TransformError;
pub use flip::{apply_flip, FlipAxis};
pub use resize::resize;
pub use threshold::{apply_threshold, binarize};

use image::{ColorType, Limits};

/// Whether a `width x height` buffer of `color` stays within the default
/// allocation limit of the image library.
pub(crate) fn fits_allocation(color: ColorType, width: u32, height: u32) -> bool {
    let limit = Limits::default().max_alloc.unwrap_or(u64::MAX);
    u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(u64::from(color.bytes_per_pixel())))
        .is_some_and(|bytes| bytes <= limit)
}
