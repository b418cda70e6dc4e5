// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter dispatcher: validates a `FilterSpec` and routes it to the matching
// operation.

use rasterwerk_core::config::EngineConfig;
use rasterwerk_core::error::Result;
use rasterwerk_core::filter::{FilterParams, FilterSpec};
use rasterwerk_core::types::RasterBuffer;
use tracing::{debug, instrument, warn};

use crate::ops;

/// Applies filter specs to rasters under a fixed engine configuration.
///
/// The dispatcher holds no mutable state and can be shared freely between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct FilterDispatcher {
    config: EngineConfig,
}

impl FilterDispatcher {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate `spec` and apply it to `buffer`.
    ///
    /// Fails only with `InvalidParameter`; a valid spec always produces a
    /// complete output raster.
    #[instrument(skip(self, buffer), fields(operation = %spec, width = buffer.width(), height = buffer.height()))]
    pub fn apply(&self, buffer: &RasterBuffer, spec: &FilterSpec) -> Result<RasterBuffer> {
        if let Err(err) = spec.validate(&self.config) {
            warn!(error = %err, "Rejected filter parameters");
            return Err(err);
        }

        let output = match *spec {
            FilterSpec::Invert => ops::invert(buffer),
            FilterSpec::Grayscale => ops::grayscale(buffer),
            FilterSpec::Blur { radius } => ops::blur(buffer, radius)?,
            FilterSpec::Brightness { factor } => ops::brightness(buffer, factor),
            FilterSpec::Contrast { factor } => ops::contrast(buffer, factor),
            FilterSpec::Sharpen => ops::sharpen(buffer),
            FilterSpec::MirrorHorizontal => ops::mirror_horizontal(buffer),
            FilterSpec::FlipVertical => ops::flip_vertical(buffer),
        };
        debug!("Filter applied");
        Ok(output)
    }

    /// String-keyed entry point: resolve `name` and apply it.
    ///
    /// Unrecognised names fail with `UnknownOperation`.
    pub fn apply_named(
        &self,
        buffer: &RasterBuffer,
        name: &str,
        params: FilterParams,
    ) -> Result<RasterBuffer> {
        let spec = FilterSpec::from_name(name, params, &self.config)?;
        self.apply(buffer, &spec)
    }
}

/// Apply `spec` under the default engine configuration.
pub fn apply(buffer: &RasterBuffer, spec: &FilterSpec) -> Result<RasterBuffer> {
    FilterDispatcher::default().apply(buffer, spec)
}
