//! Grayscale threshold binarization.
//!
//! The source is reduced to 8-bit luminance by the image library, then each
//! pixel becomes pure white when its luminance is strictly above the cutoff
//! and pure black otherwise. The result is always single-channel.
//!
//! Luminance uses the library's Rec. 709 weights
//! (`0.2126 R + 0.7152 G + 0.0722 B`). Editors built on Rec. 601 weights
//! (`0.299 R + 0.587 G + 0.114 B`) split saturated colors differently at
//! the same cutoff: pure red has luma 54 here against 76 there. Grays are
//! unaffected.

use image::{DynamicImage, GrayImage};

use super::TransformError;

/// Binarize an image against a luminance cutoff.
pub fn binarize(image: &DynamicImage, cutoff: u8) -> GrayImage {
    let mut gray = image.to_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > cutoff { 255 } else { 0 };
    }
    gray
}

/// Check that an integer threshold is a valid 8-bit cutoff.
///
/// # Errors
///
/// Returns `TransformError::InvalidThreshold` if `threshold` is outside 0-255.
fn validate_threshold(threshold: i32) -> Result<u8, TransformError> {
    u8::try_from(threshold).map_err(|_| TransformError::InvalidThreshold(threshold))
}

/// Binarize with an unchecked integer threshold.
///
/// Returns the binarized image together with the cutoff that was applied.
pub fn apply_threshold(
    image: &DynamicImage,
    threshold: i32,
) -> Result<(DynamicImage, u8), TransformError> {
    let cutoff = validate_threshold(threshold)?;
    Ok((DynamicImage::ImageLuma8(binarize(image, cutoff)), cutoff))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = DynamicImage> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let len = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), len..=len).prop_map(move |pixels| {
                DynamicImage::ImageRgb8(image::RgbImage::from_raw(w, h, pixels).unwrap())
            })
        })
    }

    proptest! {
        /// Property: Every output pixel is pure black or pure white.
        #[test]
        fn prop_output_is_binary(img in image_strategy(), cutoff in any::<u8>()) {
            let result = binarize(&img, cutoff);
            prop_assert!(result.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        }

        /// Property: White exactly where the library luminance exceeds the cutoff.
        #[test]
        fn prop_matches_library_luminance(img in image_strategy(), cutoff in any::<u8>()) {
            let luma = img.to_luma8();
            let result = binarize(&img, cutoff);

            for (out, lum) in result.pixels().zip(luma.pixels()) {
                let expected = if lum.0[0] > cutoff { 255 } else { 0 };
                prop_assert_eq!(out.0[0], expected);
            }
        }

        /// Property: Binarizing a binarized image with the same cutoff is a no-op.
        #[test]
        fn prop_stable_on_own_output(img in image_strategy(), cutoff in any::<u8>()) {
            let once = DynamicImage::ImageLuma8(binarize(&img, cutoff));
            let twice = binarize(&once, cutoff);

            prop_assert_eq!(twice.as_raw().as_slice(), once.as_bytes());
        }
    }
}
