// SPDX-License-Identifier: GPL-3.0-or-later
// src/engine/transform.rs
//
// Stateless raster transforms. Every function is best-effort: degenerate
// arguments return the input unchanged instead of propagating an error.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use log::warn;

use crate::constant::{MAX_IMAGE_DIMENSION, OVERSAMPLE_FACTOR};

/// Uniformly resize by `factor`. A non-positive factor is a no-op.
pub fn scale(image: &DynamicImage, factor: f64) -> DynamicImage {
    if factor <= 0.0 || !factor.is_finite() {
        warn!("ignoring non-positive scale factor {factor}");
        return image.clone();
    }
    let (w, h) = image.dimensions();
    let new_w = scaled_dimension(w, factor);
    let new_h = scaled_dimension(h, factor);
    image.resize_exact(new_w, new_h, FilterType::Triangle)
}

/// Proportionally scale down to fit within `max_width` x `max_height`.
/// Never upscales; the tighter dimension binds.
pub fn resize_bounded(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if max_width == 0 || max_height == 0 {
        warn!("ignoring zero-sized resize bound {max_width}x{max_height}");
        return image.clone();
    }
    let (w, h) = image.dimensions();
    if w <= max_width && h <= max_height {
        return image.clone();
    }
    // DynamicImage::resize preserves aspect ratio within the bounds.
    image.resize(max_width, max_height, FilterType::Triangle)
}

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if width == 0 || height == 0 {
        warn!("ignoring zero-sized exact resize {width}x{height}");
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Triangle)
}

/// Rotate clockwise by `degrees`.
///
/// Right angles are lossless dimension swaps via `imageops`; arbitrary
/// angles are resampled about the image center at unchanged dimensions.
pub fn rotate(image: &DynamicImage, degrees: f64) -> DynamicImage {
    if !degrees.is_finite() {
        warn!("ignoring non-finite rotation angle");
        return image.clone();
    }

    let normalized = degrees.rem_euclid(360.0);
    let right_angle = (normalized / 90.0).round() * 90.0;
    if (normalized - right_angle).abs() < f64::EPSILON * 360.0 {
        return match right_angle as u32 % 360 {
            90 => DynamicImage::ImageRgba8(imageops::rotate90(image)),
            180 => DynamicImage::ImageRgba8(imageops::rotate180(image)),
            270 => DynamicImage::ImageRgba8(imageops::rotate270(image)),
            _ => image.clone(),
        };
    }

    let rotated = rotate_about_center(
        &image.to_rgba8(),
        normalized.to_radians() as f32,
        Interpolation::Bilinear,
        Rgba([255, 255, 255, 255]),
    );
    DynamicImage::ImageRgba8(rotated)
}

/// Convert to an 8-bit single-channel grayscale image.
pub fn to_grayscale(image: &DynamicImage) -> DynamicImage {
    image.grayscale()
}

/// Whether either pixel dimension exceeds `max_dimension`.
///
/// Callers use this to warn about inputs likely to make an operation slow;
/// nothing in the engine enforces it.
pub fn is_too_large(image: &DynamicImage, max_dimension: u32) -> bool {
    let (w, h) = image.dimensions();
    w > max_dimension || h > max_dimension
}

/// `is_too_large` with the engine's default threshold.
pub fn is_too_large_default(image: &DynamicImage) -> bool {
    is_too_large(image, MAX_IMAGE_DIMENSION)
}

/// Resize by independent factors through an oversized intermediate buffer,
/// trading speed for a smoother result than a single-pass resample.
pub fn resize_high_quality(image: &DynamicImage, scale_x: f64, scale_y: f64) -> DynamicImage {
    if scale_x <= 0.0 || scale_y <= 0.0 || !scale_x.is_finite() || !scale_y.is_finite() {
        warn!("ignoring non-positive high-quality scale ({scale_x}, {scale_y})");
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let target_w = scaled_dimension(w, scale_x);
    let target_h = scaled_dimension(h, scale_y);

    // Oversample first, then filter down to the target size.
    let over_w = target_w.saturating_mul(OVERSAMPLE_FACTOR).max(1);
    let over_h = target_h.saturating_mul(OVERSAMPLE_FACTOR).max(1);
    image
        .resize_exact(over_w, over_h, FilterType::CatmullRom)
        .resize_exact(target_w, target_h, FilterType::Lanczos3)
}

fn scaled_dimension(dimension: u32, factor: f64) -> u32 {
    (f64::from(dimension) * factor).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(w: u32, h: u32) -> DynamicImage {
        DynamicImage::new_rgba8(w, h)
    }

    #[test]
    fn scale_halves_both_dimensions() {
        let img = source(200, 100);
        assert_eq!(scale(&img, 0.5).dimensions(), (100, 50));
    }

    #[test]
    fn non_positive_scale_is_a_no_op() {
        crate::testutil::init_logging();
        let img = source(200, 100);
        assert_eq!(scale(&img, 0.0).dimensions(), (200, 100));
        assert_eq!(scale(&img, -2.0).dimensions(), (200, 100));
    }

    #[test]
    fn tiny_scale_clamps_to_one_pixel() {
        let img = source(10, 10);
        assert_eq!(scale(&img, 0.001).dimensions(), (1, 1));
    }

    #[test]
    fn resize_bounded_binds_on_the_tighter_dimension() {
        let img = source(200, 100);
        assert_eq!(resize_bounded(&img, 50, 50).dimensions(), (50, 25));
    }

    #[test]
    fn resize_bounded_never_upscales() {
        let img = source(40, 30);
        assert_eq!(resize_bounded(&img, 100, 100).dimensions(), (40, 30));
    }

    #[test]
    fn resize_exact_ignores_aspect_ratio() {
        let img = source(100, 100);
        assert_eq!(resize_exact(&img, 30, 70).dimensions(), (30, 70));
        assert_eq!(resize_exact(&img, 0, 70).dimensions(), (100, 100));
    }

    #[test]
    fn right_angle_rotation_swaps_dimensions() {
        let img = source(200, 100);
        assert_eq!(rotate(&img, 90.0).dimensions(), (100, 200));
        assert_eq!(rotate(&img, 180.0).dimensions(), (200, 100));
        assert_eq!(rotate(&img, -90.0).dimensions(), (100, 200));
        assert_eq!(rotate(&img, 360.0).dimensions(), (200, 100));
    }

    #[test]
    fn rotation_round_trip_restores_dimensions() {
        let img = source(123, 77);
        let back = rotate(&rotate(&img, 90.0), -90.0);
        assert_eq!(back.dimensions(), img.dimensions());
    }

    #[test]
    fn arbitrary_rotation_keeps_dimensions() {
        let img = source(60, 40);
        assert_eq!(rotate(&img, 33.0).dimensions(), (60, 40));
    }

    #[test]
    fn grayscale_is_single_channel_eight_bit() {
        let img = source(10, 10);
        assert!(matches!(to_grayscale(&img), DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn too_large_checks_either_dimension() {
        assert!(is_too_large(&source(4001, 10), 4000));
        assert!(is_too_large(&source(10, 4001), 4000));
        assert!(!is_too_large(&source(4000, 4000), 4000));
        assert!(!is_too_large_default(&source(100, 100)));
    }

    #[test]
    fn high_quality_resize_hits_the_target_size() {
        let img = source(100, 50);
        assert_eq!(resize_high_quality(&img, 0.5, 0.5).dimensions(), (50, 25));
        assert_eq!(resize_high_quality(&img, 2.0, 1.0).dimensions(), (200, 50));
        assert_eq!(resize_high_quality(&img, -1.0, 1.0).dimensions(), (100, 50));
    }
}
