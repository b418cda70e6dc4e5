// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rasterwerk-filters: Scalar raster filters for the Rasterwerk engine.
//
// Provides convolution kernels, the per-pixel and neighbourhood filter
// operations (invert, grayscale, blur, brightness, contrast, sharpen, mirror,
// flip), the `FilterSpec` dispatcher, and a codec bridge to the `image` crate.

pub mod codec;
pub mod dispatch;
pub mod kernel;
pub mod ops;

// Re-export the primary items so callers can use `rasterwerk_filters::FilterDispatcher` etc.
pub use dispatch::{FilterDispatcher, apply};
pub use kernel::{EdgePolicy, Kernel};
