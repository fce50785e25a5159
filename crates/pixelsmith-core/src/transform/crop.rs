//! Image cropping by pixel rectangle.
//!
//! The rectangle is given as four edges in pixels. `left`/`top` are
//! inclusive and `right`/`bottom` exclusive, so the output is exactly
//! `(right - left) x (bottom - top)`.
//!
//! The rectangle may reach past the image edges as long as it overlaps the
//! image. Uncovered area is zero-filled (black, and transparent where the
//! image has alpha). Inverted, empty or fully disjoint rectangles are
//! rejected.

use image::{imageops, DynamicImage, ImageBuffer, Pixel};

use super::{fits_allocation, TransformError};

/// Crop an image to the given pixel rectangle.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `left` - Left edge (inclusive)
/// * `top` - Top edge (inclusive)
/// * `right` - Right edge (exclusive)
/// * `bottom` - Bottom edge (exclusive)
///
/// # Errors
///
/// Returns `TransformError::InvalidCrop` if `left >= right`, `top >= bottom`,
/// the rectangle does not overlap the image, or the padded output would be
/// too large to allocate.
pub fn apply_crop(
    image: &DynamicImage,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
) -> Result<DynamicImage, TransformError> {
    let (width, height) = (image.width(), image.height());
    let invalid = || TransformError::InvalidCrop {
        left,
        top,
        right,
        bottom,
        width,
        height,
    };

    if left >= right || top >= bottom {
        return Err(invalid());
    }
    if right <= 0 || bottom <= 0 || left >= i64::from(width) || top >= i64::from(height) {
        return Err(invalid());
    }

    let out_width = right
        .checked_sub(left)
        .and_then(|w| u32::try_from(w).ok())
        .ok_or_else(invalid)?;
    let out_height = bottom
        .checked_sub(top)
        .and_then(|h| u32::try_from(h).ok())
        .ok_or_else(invalid)?;

    let inside =
        left >= 0 && top >= 0 && right <= i64::from(width) && bottom <= i64::from(height);
    if !inside {
        if !fits_allocation(image.color(), out_width, out_height) {
            return Err(invalid());
        }
        return Ok(pad_crop(image, out_width, out_height, -left, -top));
    }

    // Fully inside, so the origin fits in u32
    let x = u32::try_from(left).map_err(|_| invalid())?;
    let y = u32::try_from(top).map_err(|_| invalid())?;

    if x == 0 && y == 0 && out_width == width && out_height == height {
        return Ok(image.clone());
    }

    Ok(image.crop_imm(x, y, out_width, out_height))
}

/// Paste `image` at `(x, y)` onto a zeroed canvas of the same color type.
fn pad_crop(image: &DynamicImage, width: u32, height: u32, x: i64, y: i64) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(paste(buf, width, height, x, y)),
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(paste(buf, width, height, x, y))
        }
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(paste(buf, width, height, x, y)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(paste(buf, width, height, x, y)),
        DynamicImage::ImageLuma16(buf) => {
            DynamicImage::ImageLuma16(paste(buf, width, height, x, y))
        }
        DynamicImage::ImageLumaA16(buf) => {
            DynamicImage::ImageLumaA16(paste(buf, width, height, x, y))
        }
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(paste(buf, width, height, x, y)),
        DynamicImage::ImageRgba16(buf) => {
            DynamicImage::ImageRgba16(paste(buf, width, height, x, y))
        }
        DynamicImage::ImageRgb32F(buf) => {
            DynamicImage::ImageRgb32F(paste(buf, width, height, x, y))
        }
        DynamicImage::ImageRgba32F(buf) => {
            DynamicImage::ImageRgba32F(paste(buf, width, height, x, y))
        }
        other => DynamicImage::ImageRgba32F(paste(&other.to_rgba32f(), width, height, x, y)),
    }
}

fn paste<P: Pixel>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    x: i64,
    y: i64,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut canvas = ImageBuffer::new(width, height);
    imageops::replace(&mut canvas, source, x, y);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([((y * width + x) % 256) as u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, 0, 0, 100, 100).unwrap();

        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 100);
        assert_eq!(result.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 2, 2, 8, 8).unwrap();

        assert_eq!(result.width(), 6);
        assert_eq!(result.height(), 6);

        // First pixel should be from position (2, 2) in the original
        // Value at (2, 2) = (2 * 10 + 2) % 256 = 22
        assert_eq!(result.to_luma8().get_pixel(0, 0).0, [22]);
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = apply_crop(&img, 0, 0, 50, 100).unwrap();

        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 100);
    }

    #[test]
    fn test_single_pixel_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 9, 9, 10, 10).unwrap();

        assert_eq!((result.width(), result.height()), (1, 1));
        assert_eq!(result.to_luma8().get_pixel(0, 0).0, [99]);
    }

    #[test]
    fn test_inverted_rectangle_rejected() {
        let img = test_image(20, 20);
        let result = apply_crop(&img, 10, 10, 5, 5);

        assert!(matches!(result, Err(TransformError::InvalidCrop { .. })));
    }

    #[test]
    fn test_degenerate_rectangle_rejected() {
        let img = test_image(20, 20);

        assert!(apply_crop(&img, 5, 5, 5, 10).is_err());
        assert!(apply_crop(&img, 5, 5, 10, 5).is_err());
    }

    #[test]
    fn test_overhanging_rectangle_is_padded() {
        let img = test_image(20, 20);
        let source = img.to_luma8();

        let result = apply_crop(&img, 10, 10, 30, 30).unwrap();
        assert_eq!(result.color(), image::ColorType::L8);
        assert_eq!((result.width(), result.height()), (20, 20));

        let result = result.to_luma8();
        for (x, y, pixel) in result.enumerate_pixels() {
            if x < 10 && y < 10 {
                assert_eq!(pixel, source.get_pixel(x + 10, y + 10));
            } else {
                assert_eq!(pixel, &Luma([0]));
            }
        }
    }

    #[test]
    fn test_negative_origin_is_padded() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, -2, -3, 5, 5).unwrap().to_luma8();

        assert_eq!(result.dimensions(), (7, 8));
        assert_eq!(result.get_pixel(0, 0), &Luma([0]));
        assert_eq!(result.get_pixel(1, 2), &Luma([0]));
        assert_eq!(result.get_pixel(2, 3), &Luma([0])); // source (0, 0) holds 0
        assert_eq!(result.get_pixel(3, 4), &Luma([11]));
    }

    #[test]
    fn test_padding_keeps_color_type_and_alpha() {
        let img = DynamicImage::ImageRgba16(image::ImageBuffer::from_pixel(
            4,
            4,
            image::Rgba([1000u16, 2000, 3000, 65535]),
        ));

        let result = apply_crop(&img, 2, 2, 6, 6).unwrap();
        let result = result.as_rgba16().unwrap();

        assert_eq!(result.get_pixel(0, 0), &image::Rgba([1000, 2000, 3000, 65535]));
        assert_eq!(result.get_pixel(3, 3), &image::Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_disjoint_rectangle_rejected() {
        let img = test_image(20, 10);

        assert!(apply_crop(&img, 20, 0, 30, 5).is_err());
        assert!(apply_crop(&img, 0, 10, 5, 15).is_err());
        assert!(apply_crop(&img, -5, -5, 0, 5).is_err());
        assert!(apply_crop(&img, -5, -5, 5, 0).is_err());
    }

    #[test]
    fn test_oversized_padding_rejected() {
        let img = test_image(20, 10);
        let result = apply_crop(&img, -1_000_000_000, 0, 10, 10);

        assert!(matches!(result, Err(TransformError::InvalidCrop { .. })));
    }

    #[test]
    fn test_error_reports_image_size() {
        let img = test_image(20, 10);
        let err = apply_crop(&img, 10, 10, 5, 5).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid crop rectangle (10, 10, 5, 5) for a 20x10 image"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
