// SPDX-License-Identifier: MPL-2.0
//! Before/after compositing for the comparison view.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image_rs::imageops::{self, FilterType};
use image_rs::{Rgba, RgbaImage};

/// Width of the divider line in pixels.
pub const DIVIDER_WIDTH: u32 = 2;

const DIVIDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Longest edge of the on-screen comparison images.
pub const PREVIEW_MAX_EDGE: u32 = 1600;

/// Horizontal divider position as a fraction of the image width (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerPosition(f32);

impl DividerPosition {
    /// Creates a position, clamping to `[0, 1]`. NaN maps to the center.
    #[must_use]
    pub fn new(fraction: f32) -> Self {
        if fraction.is_nan() {
            return Self::default();
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Column at which the "after" image starts for a given width.
    #[must_use]
    pub fn split_column(self, width: u32) -> u32 {
        ((width as f32) * self.0).round().min(width as f32) as u32
    }
}

impl Default for DividerPosition {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Dimensions of the preview for a `width` x `height` image.
#[must_use]
pub fn preview_size(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= PREVIEW_MAX_EDGE {
        return (width, height);
    }
    let scale = PREVIEW_MAX_EDGE as f32 / longest as f32;
    let fit = |side: u32| ((side as f32 * scale).round() as u32).max(1);
    (fit(width), fit(height))
}

/// Downscales `image` to [`preview_size`], leaving small images untouched.
#[must_use]
pub fn fit_preview(image: RgbaImage) -> RgbaImage {
    let (width, height) = preview_size(image.width(), image.height());
    if (width, height) == image.dimensions() {
        return image;
    }
    imageops::resize(&image, width, height, FilterType::Triangle)
}

/// Composes `before` (left of the divider) and `after` (right of it).
///
/// The output has `before`'s dimensions. Where `after` is smaller, the
/// uncovered area keeps the `before` pixels.
#[must_use]
pub fn compose(before: &RgbaImage, after: &RgbaImage, divider: DividerPosition) -> RgbaImage {
    let width = before.width();
    let split = divider.split_column(width);
    let half_line = DIVIDER_WIDTH / 2;
    let line_start = split.saturating_sub(half_line);
    let line_end = (split + (DIVIDER_WIDTH - half_line)).min(width);

    RgbaImage::from_fn(width, before.height(), |x, y| {
        if x >= line_start && x < line_end && width > DIVIDER_WIDTH {
            DIVIDER_COLOR
        } else if x >= split && x < after.width() && y < after.height() {
            *after.get_pixel(x, y)
        } else {
            *before.get_pixel(x, y)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn small_images_keep_their_size() {
        assert_eq!(preview_size(640, 480), (640, 480));
        assert_eq!(preview_size(PREVIEW_MAX_EDGE, 10), (PREVIEW_MAX_EDGE, 10));
        let image = RgbaImage::from_pixel(4, 3, RED);
        assert_eq!(fit_preview(image).dimensions(), (4, 3));
    }

    #[test]
    fn large_images_are_scaled_to_the_longest_edge() {
        assert_eq!(preview_size(6400, 3200), (PREVIEW_MAX_EDGE, 800));
        assert_eq!(preview_size(100, 32_000), (5, PREVIEW_MAX_EDGE));
        let image = RgbaImage::from_pixel(3200, 20, BLUE);
        let fitted = fit_preview(image);
        assert_eq!(fitted.dimensions(), (PREVIEW_MAX_EDGE, 10));
        assert_eq!(*fitted.get_pixel(0, 0), BLUE);
    }

    #[test]
    fn divider_position_clamps() {
        assert_eq!(DividerPosition::new(-1.0).value(), 0.0);
        assert_eq!(DividerPosition::new(2.0).value(), 1.0);
        assert_eq!(DividerPosition::new(f32::NAN), DividerPosition::default());
        assert_eq!(DividerPosition::default().value(), 0.5);
    }

    #[test]
    fn split_column_scales_with_width() {
        assert_eq!(DividerPosition::new(0.25).split_column(100), 25);
        assert_eq!(DividerPosition::new(1.0).split_column(100), 100);
        assert_eq!(DividerPosition::new(0.0).split_column(100), 0);
    }

    #[test]
    fn left_shows_before_and_right_shows_after() {
        let before = RgbaImage::from_pixel(20, 4, RED);
        let after = RgbaImage::from_pixel(20, 4, BLUE);
        let composed = compose(&before, &after, DividerPosition::default());

        assert_eq!(*composed.get_pixel(0, 0), RED);
        assert_eq!(*composed.get_pixel(19, 3), BLUE);
        assert_eq!(*composed.get_pixel(10, 2), DIVIDER_COLOR);
        assert_eq!(*composed.get_pixel(9, 2), DIVIDER_COLOR);
        assert_eq!(*composed.get_pixel(8, 2), RED);
        assert_eq!(*composed.get_pixel(11, 2), BLUE);
    }

    #[test]
    fn divider_at_left_edge_shows_only_after() {
        let before = RgbaImage::from_pixel(10, 2, RED);
        let after = RgbaImage::from_pixel(10, 2, BLUE);
        let composed = compose(&before, &after, DividerPosition::new(0.0));
        assert_eq!(*composed.get_pixel(9, 0), BLUE);
        assert_eq!(*composed.get_pixel(0, 0), DIVIDER_COLOR);
    }

    #[test]
    fn smaller_after_image_falls_back_to_before() {
        let before = RgbaImage::from_pixel(10, 10, RED);
        let after = RgbaImage::from_pixel(6, 6, BLUE);
        let composed = compose(&before, &after, DividerPosition::new(0.0));
        assert_eq!(composed.dimensions(), (10, 10));
        assert_eq!(*composed.get_pixel(4, 4), BLUE);
        assert_eq!(*composed.get_pixel(8, 8), RED);
    }
}
