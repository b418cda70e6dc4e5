// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter operations. Every function borrows its source raster and returns a
// freshly allocated one of the same dimensions. Only `blur` can fail, and only
// for a radius past the hard ceiling.

pub mod color;
pub mod geometry;
pub mod spatial;

pub use color::{brightness, contrast, grayscale, invert};
pub use geometry::{flip_vertical, mirror_horizontal};
pub use spatial::{blur, sharpen};
