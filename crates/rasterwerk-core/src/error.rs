// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Rasterwerk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all Rasterwerk operations.
#[derive(Debug, Error)]
pub enum RasterwerkError {
    // -- Raster geometry --
    #[error("pixel ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("raster dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("expected {expected} pixels for the raster, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} bytes of packed RGBA data, got {actual}")]
    ByteLengthMismatch { expected: usize, actual: usize },

    // -- Filter selection --
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    // -- Batch --
    #[error("no raster buffer supplied for item {0}")]
    MissingBuffer(String),

    // -- Codec bridge --
    #[error("image codec error: {0}")]
    Codec(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stable, serializable classification of a `RasterwerkError`.
///
/// Used as the per-item status in batch reports, where the full error value
/// (which may wrap an `io::Error`) cannot be cloned or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutOfBounds,
    InvalidDimensions,
    PixelCountMismatch,
    InvalidParameter,
    UnknownOperation,
    MissingBuffer,
    Codec,
    Config,
    Io,
    Serialization,
}

impl RasterwerkError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// The stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::PixelCountMismatch { .. } | Self::ByteLengthMismatch { .. } => {
                ErrorKind::PixelCountMismatch
            }
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnknownOperation(_) => ErrorKind::UnknownOperation,
            Self::MissingBuffer(_) => ErrorKind::MissingBuffer,
            Self::Codec(_) => ErrorKind::Codec,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::OutOfBounds => "out_of_bounds",
            Self::InvalidDimensions => "invalid_dimensions",
            Self::PixelCountMismatch => "pixel_count_mismatch",
            Self::InvalidParameter => "invalid_parameter",
            Self::UnknownOperation => "unknown_operation",
            Self::MissingBuffer => "missing_buffer",
            Self::Codec => "codec",
            Self::Config => "config",
            Self::Io => "io",
            Self::Serialization => "serialization",
        };
        f.write_str(label)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RasterwerkError>;
