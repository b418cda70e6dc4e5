// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster domain types: pixels and the row-major RGBA buffer every filter
// reads from and writes to.

use serde::{Deserialize, Serialize};

use crate::error::{RasterwerkError, Result};

/// One 8-bit-per-channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(channels: [u8; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }

    /// Apply `f` to the color channels, leaving alpha untouched.
    #[inline]
    pub fn map_rgb(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: self.a,
        }
    }
}

/// A two-dimensional RGBA raster stored row-major with a top-left origin.
///
/// The pixel vector always holds exactly `width * height` entries and both
/// dimensions are non-zero. Buffers are never resized in place: every filter
/// allocates a fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl RasterBuffer {
    // -- Construction ---------------------------------------------------------

    /// Wrap an existing pixel vector.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(RasterwerkError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; len],
        })
    }

    /// Build a raster by evaluating `f(x, y)` for each position in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Pixel) -> Result<Self> {
        let len = checked_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Interpret a packed `RGBARGBA...` byte slice.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = checked_len(width, height)?;
        let expected_bytes = expected
            .checked_mul(4)
            .ok_or(RasterwerkError::InvalidDimensions { width, height })?;
        if bytes.len() != expected_bytes {
            return Err(RasterwerkError::ByteLengthMismatch {
                expected: expected_bytes,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Packed `RGBARGBA...` bytes, suitable for handing to an encoder.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Bounds-checked read.
    pub fn get(&self, x: u32, y: u32) -> Result<Pixel> {
        let idx = self.index_of(x, y)?;
        Ok(self.pixels[idx])
    }

    /// Bounds-checked write.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        let idx = self.index_of(x, y)?;
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// Read with signed coordinates clamped to the nearest in-bounds pixel.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Pixel {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[cy * self.width as usize + cx]
    }

    /// Read with signed coordinates, `None` outside the raster.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Pixel> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    // -- Derivation -----------------------------------------------------------

    /// A new raster of the same size with `f` applied to every pixel.
    pub fn map_pixels(&self, f: impl FnMut(&Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }

    /// Like [`RasterBuffer::map_pixels`], but `f` also receives the `(x, y)`
    /// position of the pixel it is producing.
    pub fn map_indexed(&self, mut f: impl FnMut(u32, u32, &Pixel) -> Pixel) -> Self {
        let width = self.width as usize;
        let pixels = self
            .pixels
            .iter()
            .enumerate()
            .map(|(idx, p)| f((idx % width) as u32, (idx / width) as u32, p))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(RasterwerkError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RasterwerkError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(RasterwerkError::InvalidDimensions { width, height })
}
