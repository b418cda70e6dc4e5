// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel color filters: invert, grayscale, brightness, contrast.
//
// All four leave alpha untouched.

use rasterwerk_core::types::{Pixel, RasterBuffer};
use tracing::{debug, instrument};

use crate::kernel::to_channel;

/// BT.601 luma weights, scaled by 1000 so the conversion stays in integers.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

/// Replace each color channel `c` with `255 - c`.
///
/// Applying it twice yields the original raster exactly.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn invert(src: &RasterBuffer) -> RasterBuffer {
    debug!("Inverting colors");
    src.map_pixels(|p| p.map_rgb(|c| 255 - c))
}

/// Convert to gray using ITU-R BT.601 luma.
///
/// `Y = round(0.299 R + 0.587 G + 0.114 B)`, computed in integer arithmetic
/// with halves rounded up, and written to R, G and B. Alpha is preserved.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn grayscale(src: &RasterBuffer) -> RasterBuffer {
    debug!("Converting to grayscale");
    src.map_pixels(|p| {
        let y = luma(p);
        Pixel::new(y, y, y, p.a)
    })
}

/// Multiply each color channel by `factor`, clamped to [0, 255].
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn brightness(src: &RasterBuffer, factor: f32) -> RasterBuffer {
    debug!(factor, "Adjusting brightness");
    src.map_pixels(|p| p.map_rgb(|c| to_channel(f32::from(c) * factor)))
}

/// Scale each color channel's distance from 128 by `factor`, clamped to
/// [0, 255]. A factor of 1.0 is a no-op; 0.0 flattens to mid-gray; negative
/// factors invert around mid-gray.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn contrast(src: &RasterBuffer, factor: f32) -> RasterBuffer {
    debug!(factor, "Adjusting contrast");
    src.map_pixels(|p| p.map_rgb(|c| to_channel((f32::from(c) - 128.0) * factor + 128.0)))
}

fn luma(p: &Pixel) -> u8 {
    let weighted = LUMA_R * u32::from(p.r) + LUMA_G * u32::from(p.g) + LUMA_B * u32::from(p.b);
    // Weights sum to 1000, so the result never exceeds 255.
    ((weighted + 500) / 1000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RasterBuffer {
        RasterBuffer::from_fn(4, 4, |x, y| {
            Pixel::new((x * 60) as u8, (y * 80) as u8, ((x + y) * 30) as u8, (x * 50 + 5) as u8)
        })
        .unwrap()
    }

    #[test]
    fn white_inverts_to_black() {
        let white = RasterBuffer::filled(2, 2, Pixel::new(255, 255, 255, 255)).unwrap();
        let out = invert(&white);
        assert!(out.pixels().iter().all(|p| *p == Pixel::new(0, 0, 0, 255)));
    }

    #[test]
    fn invert_keeps_alpha() {
        let src = RasterBuffer::filled(1, 1, Pixel::new(10, 20, 30, 40)).unwrap();
        assert_eq!(invert(&src).get(0, 0).unwrap(), Pixel::new(245, 235, 225, 40));
    }

    #[test]
    fn grayscale_uses_bt601_weights() {
        let src = RasterBuffer::from_fn(3, 1, |x, _| match x {
            0 => Pixel::rgb(255, 0, 0),
            1 => Pixel::rgb(0, 255, 0),
            _ => Pixel::new(0, 0, 255, 17),
        })
        .unwrap();
        let out = grayscale(&src);
        // 0.299 * 255 = 76.245, 0.587 * 255 = 149.685, 0.114 * 255 = 29.07
        assert_eq!(out.get(0, 0).unwrap(), Pixel::rgb(76, 76, 76));
        assert_eq!(out.get(1, 0).unwrap(), Pixel::rgb(150, 150, 150));
        assert_eq!(out.get(2, 0).unwrap(), Pixel::new(29, 29, 29, 17));
    }

    #[test]
    fn grayscale_of_white_stays_white() {
        let src = RasterBuffer::filled(2, 1, Pixel::WHITE).unwrap();
        assert_eq!(grayscale(&src), src);
    }

    #[test]
    fn brightness_scales_and_clamps() {
        let src = RasterBuffer::filled(1, 1, Pixel::new(100, 200, 0, 50)).unwrap();
        assert_eq!(
            brightness(&src, 1.5).get(0, 0).unwrap(),
            Pixel::new(150, 255, 0, 50)
        );
        assert_eq!(
            brightness(&src, -5.0).get(0, 0).unwrap(),
            Pixel::new(0, 0, 0, 50)
        );
    }

    #[test]
    fn contrast_pivots_on_mid_gray() {
        let src = RasterBuffer::filled(1, 1, Pixel::new(128, 138, 118, 9)).unwrap();
        assert_eq!(
            contrast(&src, 2.0).get(0, 0).unwrap(),
            Pixel::new(128, 148, 108, 9)
        );
        assert_eq!(
            contrast(&src, 0.0).get(0, 0).unwrap(),
            Pixel::new(128, 128, 128, 9)
        );
        assert_eq!(
            contrast(&src, 10.0).get(0, 0).unwrap(),
            Pixel::new(128, 228, 28, 9)
        );
    }

    #[test]
    fn unit_factors_are_identity() {
        let src = sample();
        assert_eq!(brightness(&src, 1.0), src);
        assert_eq!(contrast(&src, 1.0), src);
    }
}
