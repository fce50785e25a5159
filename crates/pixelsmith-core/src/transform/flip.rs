//! Mirroring along an axis.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Axis to mirror along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    /// Swap left and right.
    Horizontal,
    /// Swap top and bottom.
    Vertical,
}

/// Mirror an image. Applying the same flip twice restores the input.
pub fn apply_flip(image: &DynamicImage, axis: FlipAxis) -> DynamicImage {
    match axis {
        FlipAxis::Horizontal => image.fliph(),
        FlipAxis::Vertical => image.flipv(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = DynamicImage> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len).prop_map(move |pixels| {
                DynamicImage::ImageRgba8(image::RgbaImage::from_raw(w, h, pixels).unwrap())
            })
        })
    }

    proptest! {
        /// Property: Flipping twice along the same axis is the identity.
        #[test]
        fn prop_flip_is_involution(
            img in image_strategy(),
            horizontal in any::<bool>(),
        ) {
            let axis = if horizontal { FlipAxis::Horizontal } else { FlipAxis::Vertical };
            let twice = apply_flip(&apply_flip(&img, axis), axis);

            prop_assert_eq!(twice.as_bytes(), img.as_bytes());
        }

        /// Property: Flipping never changes dimensions.
        #[test]
        fn prop_flip_keeps_dimensions(img in image_strategy()) {
            for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
                let flipped = apply_flip(&img, axis);
                prop_assert_eq!(flipped.width(), img.width());
                prop_assert_eq!(flipped.height(), img.height());
            }
        }
    }
}
