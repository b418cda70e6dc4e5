// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Neighbourhood filters built on `Kernel::convolve`.

use rasterwerk_core::error::Result;
use rasterwerk_core::types::RasterBuffer;
use tracing::{debug, instrument};

use crate::kernel::Kernel;

/// Box blur with a `(2 * radius + 1)` square window and clamped edges.
///
/// Radius 0 returns an unmodified copy. Radii above
/// [`rasterwerk_core::MAX_BLUR_RADIUS`] fail with `InvalidParameter`.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn blur(src: &RasterBuffer, radius: u32) -> Result<RasterBuffer> {
    if radius == 0 {
        debug!("Zero blur radius, copying source");
        return Ok(src.clone());
    }
    let kernel = Kernel::box_blur(radius)?;
    debug!(window = kernel.size(), "Applying box blur");
    Ok(kernel.convolve(src))
}

/// Sharpen with the 3x3 kernel `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn sharpen(src: &RasterBuffer) -> RasterBuffer {
    debug!("Applying sharpen kernel");
    Kernel::sharpen().convolve(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterwerk_core::ErrorKind;
    use rasterwerk_core::types::Pixel;

    fn red_dot() -> RasterBuffer {
        RasterBuffer::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Pixel::rgb(255, 0, 0)
            } else {
                Pixel::rgb(0, 0, 0)
            }
        })
        .unwrap()
    }

    #[test]
    fn radius_zero_is_identity() {
        let src = red_dot();
        assert_eq!(blur(&src, 0).unwrap(), src);
    }

    #[test]
    fn single_red_pixel_spreads_evenly() {
        let out = blur(&red_dot(), 1).unwrap();
        // 255 / 9 = 28.33, rounded to 28.
        assert_eq!(out.get(1, 1).unwrap(), Pixel::rgb(28, 0, 0));
        assert_eq!(out.dimensions(), (3, 3));
        assert!(out.pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn corner_samples_are_clamped_not_zeroed() {
        // The corner window at (0,0) clamps to 4 distinct pixels, one of which
        // is the red center, sampled once: 255 / 9 again.
        let out = blur(&red_dot(), 1).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), Pixel::rgb(28, 0, 0));
    }

    #[test]
    fn radius_past_the_ceiling_is_an_error() {
        let src = RasterBuffer::filled(1, 1, Pixel::WHITE).unwrap();
        let err = blur(&src, u32::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn sharpen_leaves_flat_regions_alone() {
        let src = RasterBuffer::filled(4, 4, Pixel::new(77, 140, 3, 60)).unwrap();
        assert_eq!(sharpen(&src), src);
    }

    #[test]
    fn sharpen_amplifies_and_clamps_edges() {
        let src = RasterBuffer::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Pixel::rgb(100, 100, 100)
            } else {
                Pixel::rgb(50, 50, 50)
            }
        })
        .unwrap();
        let out = sharpen(&src);
        // Center: 5 * 100 - 4 * 50 = 300, clamped to 255.
        assert_eq!(out.get(1, 1).unwrap(), Pixel::rgb(255, 255, 255));
        // Edge midpoint (1,0): 5 * 50 - (50 [clamped above] + 50 + 50 + 100) = 0.
        assert_eq!(out.get(1, 0).unwrap(), Pixel::rgb(0, 0, 0));
    }
}
