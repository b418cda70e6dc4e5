// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RasterwerkError, Result};

/// Hard ceiling for any blur radius, whatever the configuration says. A
/// radius of 1024 already needs a 2049x2049 kernel.
pub const MAX_BLUR_RADIUS: u32 = 1024;

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the batch worker pool. `0` lets rayon pick (one per core);
    /// `1` processes batches sequentially on the calling thread.
    pub worker_threads: usize,
    /// Largest blur radius accepted by the dispatcher. At most
    /// [`MAX_BLUR_RADIUS`].
    pub max_blur_radius: u32,
    /// Radius used when `blur` is selected by name without a radius.
    pub default_blur_radius: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            max_blur_radius: 64,
            default_blur_radius: 3,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Absent fields keep their defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject self-contradictory settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_blur_radius > MAX_BLUR_RADIUS {
            return Err(RasterwerkError::Config(format!(
                "max_blur_radius {} exceeds the hard limit of {MAX_BLUR_RADIUS}",
                self.max_blur_radius
            )));
        }
        if self.default_blur_radius > self.max_blur_radius {
            return Err(RasterwerkError::Config(format!(
                "default_blur_radius {} exceeds max_blur_radius {}",
                self.default_blur_radius, self.max_blur_radius
            )));
        }
        Ok(())
    }
}
