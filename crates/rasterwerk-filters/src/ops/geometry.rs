// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lossless reflections. Pixels are moved, never recomputed.

use rasterwerk_core::types::RasterBuffer;
use tracing::{debug, instrument};

/// Mirror left to right: `out(x, y) = in(w - 1 - x, y)`.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn mirror_horizontal(src: &RasterBuffer) -> RasterBuffer {
    debug!("Mirroring horizontally");
    let last_x = i64::from(src.width()) - 1;
    src.map_indexed(|x, y, _| src.get_clamped(last_x - i64::from(x), i64::from(y)))
}

/// Flip top to bottom: `out(x, y) = in(x, h - 1 - y)`.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn flip_vertical(src: &RasterBuffer) -> RasterBuffer {
    debug!("Flipping vertically");
    let last_y = i64::from(src.height()) - 1;
    src.map_indexed(|x, y, _| src.get_clamped(i64::from(x), last_y - i64::from(y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterwerk_core::types::Pixel;

    fn gradient() -> RasterBuffer {
        RasterBuffer::from_fn(3, 2, |x, y| Pixel::new(x as u8, y as u8, 0, 200)).unwrap()
    }

    #[test]
    fn mirror_swaps_columns() {
        let out = mirror_horizontal(&gradient());
        assert_eq!(out.get(0, 1).unwrap(), Pixel::new(2, 1, 0, 200));
        assert_eq!(out.get(1, 0).unwrap(), Pixel::new(1, 0, 0, 200));
        assert_eq!(mirror_horizontal(&out), gradient());
    }

    #[test]
    fn flip_swaps_rows() {
        let out = flip_vertical(&gradient());
        assert_eq!(out.get(2, 0).unwrap(), Pixel::new(2, 1, 0, 200));
        assert_eq!(flip_vertical(&out), gradient());
    }
}
