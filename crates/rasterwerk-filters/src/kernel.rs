// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Square convolution kernels and the scalar convolution shared by the blur
// and sharpen filters.

use rasterwerk_core::config::MAX_BLUR_RADIUS;
use rasterwerk_core::error::{RasterwerkError, Result};
use rasterwerk_core::types::{Pixel, RasterBuffer};

/// How samples that fall outside the raster are sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Use the nearest in-bounds pixel. Avoids darkening at the borders.
    Clamp,
    /// Treat out-of-bounds samples as zero (they contribute nothing).
    ZeroPad,
}

/// A square matrix of weights with odd side length.
///
/// Weights are stored row-major: `weights[row * size + col]`. They are used
/// as-is; a kernel whose weights do not sum to 1 changes overall brightness.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    edge: EdgePolicy,
}

impl Kernel {
    /// Build a kernel, checking that `size` is odd and matches `weights`.
    pub fn new(size: usize, weights: Vec<f32>, edge: EdgePolicy) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(RasterwerkError::invalid_parameter(
                "kernel size",
                format!("must be odd and at least 1, got {size}"),
            ));
        }
        if weights.len() != size * size {
            return Err(RasterwerkError::invalid_parameter(
                "kernel weights",
                format!("expected {} weights, got {}", size * size, weights.len()),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(RasterwerkError::invalid_parameter(
                "kernel weights",
                "all weights must be finite",
            ));
        }
        Ok(Self {
            size,
            weights,
            edge,
        })
    }

    /// Uniform `(2r+1)²` box kernel with clamped edges.
    ///
    /// Radii above [`MAX_BLUR_RADIUS`] are rejected with `InvalidParameter`.
    pub fn box_blur(radius: u32) -> Result<Self> {
        if radius > MAX_BLUR_RADIUS {
            return Err(RasterwerkError::invalid_parameter(
                "radius",
                format!("{radius} exceeds the hard limit of {MAX_BLUR_RADIUS}"),
            ));
        }
        let size = 2 * radius as usize + 1;
        let weight = 1.0 / (size * size) as f32;
        Ok(Self {
            size,
            weights: vec![weight; size * size],
            edge: EdgePolicy::Clamp,
        })
    }

    /// 3x3 Laplacian sharpen with clamped edges. Weights sum to 1.
    pub fn sharpen() -> Self {
        #[rustfmt::skip]
        let weights = vec![
             0.0, -1.0,  0.0,
            -1.0,  5.0, -1.0,
             0.0, -1.0,  0.0,
        ];
        Self {
            size: 3,
            weights,
            edge: EdgePolicy::Clamp,
        }
    }

    pub fn with_edge_policy(mut self, edge: EdgePolicy) -> Self {
        self.edge = edge;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to the kernel border (`size / 2`).
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge
    }

    /// Weight at `(col, row)`, or `None` outside the kernel.
    pub fn weight(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.weights[row * self.size + col])
    }

    /// Convolve the color channels of `src` with this kernel.
    ///
    /// Each output channel is `Σ weight * sample`, clamped to [0, 255] and
    /// rounded half away from zero. Alpha is never convolved: every output
    /// pixel keeps the alpha of the source pixel at the same position.
    pub fn convolve(&self, src: &RasterBuffer) -> RasterBuffer {
        let c = self.radius() as i64;
        src.map_indexed(|x, y, center| {
            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            for row in 0..self.size {
                let sy = y as i64 + row as i64 - c;
                for col in 0..self.size {
                    let weight = self.weights[row * self.size + col];
                    if weight == 0.0 {
                        continue;
                    }
                    let sx = x as i64 + col as i64 - c;
                    let sample = match self.edge {
                        EdgePolicy::Clamp => src.get_clamped(sx, sy),
                        EdgePolicy::ZeroPad => match src.get_signed(sx, sy) {
                            Some(p) => p,
                            None => continue,
                        },
                    };
                    r += weight * f32::from(sample.r);
                    g += weight * f32::from(sample.g);
                    b += weight * f32::from(sample.b);
                }
            }
            Pixel::new(to_channel(r), to_channel(g), to_channel(b), center.a)
        })
    }
}

/// Clamp to the 8-bit range and round half away from zero.
#[inline]
pub(crate) fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterwerk_core::ErrorKind;

    #[test]
    fn even_or_empty_sizes_are_rejected() {
        let err = Kernel::new(2, vec![0.25; 4], EdgePolicy::Clamp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        let err = Kernel::new(0, Vec::new(), EdgePolicy::Clamp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        let err = Kernel::new(3, vec![1.0; 4], EdgePolicy::Clamp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn box_kernel_is_uniform() {
        let k = Kernel::box_blur(2).unwrap();
        assert_eq!(k.size(), 5);
        assert_eq!(k.radius(), 2);
        let sum: f32 = (0..5)
            .flat_map(|r| (0..5).map(move |c| (c, r)))
            .map(|(c, r)| k.weight(c, r).unwrap())
            .sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(k.weight(5, 0), None);
    }

    #[test]
    fn oversized_box_kernel_is_rejected() {
        assert_eq!(Kernel::box_blur(MAX_BLUR_RADIUS).unwrap().size(), 2049);
        let err = Kernel::box_blur(MAX_BLUR_RADIUS + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        let err = Kernel::box_blur(u32::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn identity_kernel_copies_source() {
        let src = RasterBuffer::from_fn(4, 3, |x, y| Pixel::new(x as u8 * 40, y as u8 * 70, 9, 128))
            .unwrap();
        let k = Kernel::new(1, vec![1.0], EdgePolicy::ZeroPad).unwrap();
        assert_eq!(k.convolve(&src), src);
    }

    #[test]
    fn clamp_edges_do_not_darken_borders() {
        let src = RasterBuffer::filled(3, 3, Pixel::rgb(200, 100, 50)).unwrap();
        let out = Kernel::box_blur(1).unwrap().convolve(&src);
        assert_eq!(out, src);
    }

    #[test]
    fn zero_pad_darkens_corners() {
        let src = RasterBuffer::filled(3, 3, Pixel::rgb(90, 90, 90)).unwrap();
        let out = Kernel::box_blur(1)
            .unwrap()
            .with_edge_policy(EdgePolicy::ZeroPad)
            .convolve(&src);
        // A corner sees 4 of its 9 neighbours: 90 * 4 / 9 = 40.
        assert_eq!(out.get(0, 0).unwrap(), Pixel::rgb(40, 40, 40));
        // The center sees all nine.
        assert_eq!(out.get(1, 1).unwrap(), Pixel::rgb(90, 90, 90));
    }

    #[test]
    fn alpha_comes_from_center_pixel() {
        let src = RasterBuffer::from_fn(3, 1, |x, _| Pixel::new(0, 0, 0, x as u8 * 100)).unwrap();
        let out = Kernel::box_blur(1).unwrap().convolve(&src);
        let alphas: Vec<u8> = out.pixels().iter().map(|p| p.a).collect();
        assert_eq!(alphas, vec![0, 100, 200]);
    }

    #[test]
    fn channel_rounding_and_clamping() {
        assert_eq!(to_channel(-12.0), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(28.333), 28);
        assert_eq!(to_channel(27.5), 28);
    }
}
