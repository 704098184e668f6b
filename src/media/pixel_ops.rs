// SPDX-License-Identifier: MPL-2.0
//! Filter functions and compositing on floating-point RGBA surfaces.
//!
//! Channels are straight (unpremultiplied) values in `[0, 1]`. The color
//! functions follow the CSS Filter Effects definitions and clamp after every
//! step. Alpha is only changed by blur and by compositing.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::media::filter::{FilterChain, FilterOp};
use image_rs::{imageops, Rgb, RgbImage, Rgba, Rgba32FImage, RgbaImage};

/// Applies every operation of `chain` in order to a copy of `source`.
#[must_use]
pub fn apply_chain(source: &Rgba32FImage, chain: &FilterChain) -> Rgba32FImage {
    let mut surface = source.clone();
    for &op in chain.ops() {
        apply_op(&mut surface, op);
    }
    surface
}

/// Applies a single filter function in place.
pub fn apply_op(surface: &mut Rgba32FImage, op: FilterOp) {
    match op {
        FilterOp::Brightness(percent) => {
            let factor = percent / 100.0;
            map_rgb(surface, |c| c * factor);
        }
        FilterOp::Contrast(percent) => {
            let factor = percent / 100.0;
            map_rgb(surface, |c| (c - 0.5) * factor + 0.5);
        }
        FilterOp::Saturate(percent) => saturate(surface, percent / 100.0),
        FilterOp::Blur(radius) => {
            if radius > 0.0 {
                blur(surface, radius);
            }
        }
    }
}

/// Gaussian blur over premultiplied color, so fully transparent pixels
/// contribute nothing to their neighbours' color.
fn blur(surface: &mut Rgba32FImage, sigma: f32) {
    for pixel in surface.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [r * a, g * a, b * a, a];
    }

    *surface = imageops::blur(&*surface, sigma);

    for pixel in surface.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let a = a.clamp(0.0, 1.0);
        pixel.0 = if a <= f32::EPSILON {
            [0.0; 4]
        } else {
            [
                (r / a).clamp(0.0, 1.0),
                (g / a).clamp(0.0, 1.0),
                (b / a).clamp(0.0, 1.0),
                a,
            ]
        };
    }
}

fn map_rgb(surface: &mut Rgba32FImage, f: impl Fn(f32) -> f32) {
    for pixel in surface.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = f(*channel).clamp(0.0, 1.0);
        }
    }
}

/// Filter Effects `saturate` matrix; `amount` 1.0 is identity, 0.0 grayscale.
fn saturate(surface: &mut Rgba32FImage, amount: f32) {
    let s = amount;
    let matrix = [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ];

    for pixel in surface.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let mut out = [0.0_f32; 3];
        for (row, slot) in matrix.iter().zip(out.iter_mut()) {
            *slot = (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 1.0);
        }
        pixel.0 = [out[0], out[1], out[2], a];
    }
}

/// Draws `src` over `dst` with source-over blending.
///
/// Both surfaces must have the same dimensions; pixels outside the common
/// area are left untouched.
pub fn draw_over(dst: &mut Rgba32FImage, src: &Rgba32FImage) {
    let width = dst.width().min(src.width());
    let height = dst.height().min(src.height());

    for y in 0..height {
        for x in 0..width {
            let top = src.get_pixel(x, y).0;
            let bottom = dst.get_pixel(x, y).0;
            dst.put_pixel(x, y, Rgba(source_over(top, bottom)));
        }
    }
}

fn source_over(top: [f32; 4], bottom: [f32; 4]) -> [f32; 4] {
    let top_a = top[3];
    let bottom_weight = bottom[3] * (1.0 - top_a);
    let out_a = top_a + bottom_weight;
    if out_a <= f32::EPSILON {
        return [0.0; 4];
    }
    let blend = |i: usize| ((top[i] * top_a + bottom[i] * bottom_weight) / out_a).clamp(0.0, 1.0);
    [blend(0), blend(1), blend(2), out_a.clamp(0.0, 1.0)]
}

/// Flattens a surface onto opaque black, as a canvas does when exporting
/// to a format without alpha.
#[must_use]
pub fn flatten_on_black(surface: &Rgba32FImage) -> RgbImage {
    RgbImage::from_fn(surface.width(), surface.height(), |x, y| {
        let [r, g, b, a] = surface.get_pixel(x, y).0;
        Rgb([to_u8(r * a), to_u8(g * a), to_u8(b * a)])
    })
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32, epsilon: f32) {
        assert!(
            (actual - expected).abs() <= epsilon,
            "{actual} differs from {expected} by more than {epsilon}"
        );
    }

    fn solid(r: f32, g: f32, b: f32, a: f32) -> Rgba32FImage {
        Rgba32FImage::from_pixel(4, 4, Rgba([r, g, b, a]))
    }

    fn first(surface: &Rgba32FImage) -> [f32; 4] {
        surface.get_pixel(0, 0).0
    }

    #[test]
    fn brightness_multiplies_channels() {
        let mut surface = solid(0.4, 0.2, 0.8, 1.0);
        apply_op(&mut surface, FilterOp::Brightness(150.0));
        let [r, g, b, a] = first(&surface);
        assert_close(r, 0.6, 1e-6);
        assert_close(g, 0.3, 1e-6);
        assert_close(b, 1.0, 1e-6);
        assert_close(a, 1.0, 1e-6);
    }

    #[test]
    fn contrast_pivots_around_mid_gray() {
        let mut surface = solid(0.5, 0.25, 0.75, 1.0);
        apply_op(&mut surface, FilterOp::Contrast(50.0));
        let [r, g, b, _] = first(&surface);
        assert_close(r, 0.5, 1e-6);
        assert_close(g, 0.375, 1e-6);
        assert_close(b, 0.625, 1e-6);
    }

    #[test]
    fn zero_saturation_produces_gray() {
        let mut surface = solid(0.9, 0.1, 0.3, 1.0);
        apply_op(&mut surface, FilterOp::Saturate(0.0));
        let [r, g, b, _] = first(&surface);
        assert_close(r, g, 1e-6);
        assert_close(g, b, 1e-6);
    }

    #[test]
    fn identity_operations_leave_pixels_unchanged() {
        let source = solid(0.2, 0.4, 0.6, 1.0);
        let chain: FilterChain = [
            FilterOp::Brightness(100.0),
            FilterOp::Contrast(100.0),
            FilterOp::Saturate(100.0),
        ]
        .into_iter()
        .collect();
        let out = apply_chain(&source, &chain);
        for (a, b) in first(&out).iter().zip(first(&source).iter()) {
            assert_close(*a, *b, 1e-5);
        }
    }

    #[test]
    fn blur_of_uniform_surface_is_uniform() {
        let mut surface = solid(0.3, 0.6, 0.9, 1.0);
        apply_op(&mut surface, FilterOp::Blur(2.0));
        for pixel in surface.pixels() {
            assert_close(pixel.0[0], 0.3, 1e-3);
            assert_close(pixel.0[2], 0.9, 1e-3);
        }
    }

    #[test]
    fn blur_does_not_bleed_transparent_color_into_opaque_pixels() {
        let mut surface = Rgba32FImage::from_pixel(9, 1, Rgba([1.0, 1.0, 1.0, 0.0]));
        surface.put_pixel(4, 0, Rgba([1.0, 0.0, 0.0, 1.0]));
        apply_op(&mut surface, FilterOp::Blur(1.0));

        let [r, g, b, a] = surface.get_pixel(4, 0).0;
        assert_close(r, 1.0, 1e-4);
        assert_close(g, 0.0, 1e-4);
        assert_close(b, 0.0, 1e-4);
        assert!(a > 0.0 && a < 1.0);

        let [nr, ng, _, na] = surface.get_pixel(5, 0).0;
        assert!(na > 0.0);
        assert_close(nr, 1.0, 1e-4);
        assert_close(ng, 0.0, 1e-4);
    }

    #[test]
    fn blur_spreads_a_single_bright_pixel() {
        let mut surface = Rgba32FImage::from_pixel(9, 9, Rgba([0.0, 0.0, 0.0, 1.0]));
        surface.put_pixel(4, 4, Rgba([1.0, 1.0, 1.0, 1.0]));
        apply_op(&mut surface, FilterOp::Blur(1.0));
        assert!(surface.get_pixel(4, 4).0[0] < 1.0);
        assert!(surface.get_pixel(5, 4).0[0] > 0.0);
    }

    #[test]
    fn opaque_source_over_replaces_destination() {
        let mut dst = solid(1.0, 0.0, 0.0, 1.0);
        draw_over(&mut dst, &solid(0.0, 0.0, 1.0, 1.0));
        assert_eq!(first(&dst), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn translucent_source_over_blends() {
        let mut dst = solid(1.0, 0.0, 0.0, 1.0);
        draw_over(&mut dst, &solid(0.0, 0.0, 1.0, 0.5));
        let [r, g, b, a] = first(&dst);
        assert_close(r, 0.5, 1e-6);
        assert_close(g, 0.0, 1e-6);
        assert_close(b, 0.5, 1e-6);
        assert_close(a, 1.0, 1e-6);
    }

    #[test]
    fn transparent_over_transparent_stays_transparent() {
        let mut dst = solid(0.0, 0.0, 0.0, 0.0);
        draw_over(&mut dst, &solid(1.0, 1.0, 1.0, 0.0));
        assert_eq!(first(&dst), [0.0; 4]);
    }

    #[test]
    fn flatten_premultiplies_onto_black() {
        let flat = flatten_on_black(&solid(1.0, 0.5, 0.0, 0.5));
        assert_eq!(flat.get_pixel(0, 0).0, [128, 64, 0]);
    }

    #[test]
    fn quantization_rounds_and_clamps() {
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(0.5), 128);
        assert_eq!(to_u8(-0.2), 0);
        assert_eq!(to_u8(1.7), 255);
    }
}
