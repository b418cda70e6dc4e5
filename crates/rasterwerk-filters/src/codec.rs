// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec bridge: converts between `RasterBuffer` and the `image` crate so
// callers can decode uploads and encode results. The filters themselves
// never touch encoded bytes.

use image::{DynamicImage, ImageFormat, RgbaImage};
use rasterwerk_core::error::{RasterwerkError, Result};
use rasterwerk_core::types::RasterBuffer;
use tracing::{debug, info, instrument};

// -- Decoding -----------------------------------------------------------------

/// Decode encoded bytes (PNG, JPEG, ...) into an RGBA raster.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_bytes(data: &[u8]) -> Result<RasterBuffer> {
    let img = image::load_from_memory(data)
        .map_err(|err| RasterwerkError::Codec(format!("failed to decode image: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    from_dynamic(&img)
}

/// Load and decode an image file. The format is inferred from its contents.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<std::path::Path>) -> Result<RasterBuffer> {
    let img = image::open(path.as_ref()).map_err(|err| {
        RasterwerkError::Codec(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    from_dynamic(&img)
}

/// Convert any decoded image to an RGBA raster.
pub fn from_dynamic(img: &DynamicImage) -> Result<RasterBuffer> {
    from_rgba_image(&img.to_rgba8())
}

/// Copy an `RgbaImage` into a raster.
pub fn from_rgba_image(img: &RgbaImage) -> Result<RasterBuffer> {
    RasterBuffer::from_rgba_bytes(img.width(), img.height(), img.as_raw())
}

// -- Encoding -----------------------------------------------------------------

/// Copy a raster into an `RgbaImage`.
pub fn to_rgba_image(raster: &RasterBuffer) -> Result<RgbaImage> {
    RgbaImage::from_raw(raster.width(), raster.height(), raster.to_rgba_bytes()).ok_or_else(|| {
        RasterwerkError::Codec(format!(
            "raster {}x{} does not fit an RGBA image",
            raster.width(),
            raster.height()
        ))
    })
}

/// Encode a raster as PNG bytes.
pub fn to_png_bytes(raster: &RasterBuffer) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgba8(to_rgba_image(raster)?);
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    img.write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| RasterwerkError::Codec(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Write a raster to a file. The format is inferred from the file extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save(raster: &RasterBuffer, path: impl AsRef<std::path::Path>) -> Result<()> {
    to_rgba_image(raster)?.save(path.as_ref()).map_err(|err| {
        RasterwerkError::Codec(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })
}
