// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter selection: the closed set of operations the engine can apply, and
// the string-keyed entry point used at process boundaries.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, MAX_BLUR_RADIUS};
use crate::error::{RasterwerkError, Result};

/// A fully parameterised filter operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum FilterSpec {
    /// `255 - c` on the color channels.
    Invert,
    /// BT.601 luma written to all three color channels.
    Grayscale,
    /// Box blur over a `(2r+1)²` neighbourhood. Radius 0 is the identity.
    Blur { radius: u32 },
    /// Multiply the color channels by `factor`.
    Brightness { factor: f32 },
    /// Scale the color channels' distance from mid-gray by `factor`.
    Contrast { factor: f32 },
    /// Fixed 3x3 Laplacian sharpen.
    Sharpen,
    /// Mirror left to right.
    MirrorHorizontal,
    /// Flip top to bottom.
    FlipVertical,
}

/// Loose parameters accompanying an operation name, as received from a CLI
/// flag or request body.
///
/// `radius` is signed so that a negative value can be reported as an
/// `InvalidParameter` instead of being silently wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub radius: Option<i64>,
    pub factor: Option<f32>,
}

/// One entry of the operation catalogue: the canonical name, the other names
/// it answers to, and the loose parameter it reads, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub parameter: Option<&'static str>,
}

impl OperationInfo {
    fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

impl FilterSpec {
    /// Every operation [`FilterSpec::from_name`] accepts.
    pub const OPERATIONS: &'static [OperationInfo] = &[
        OperationInfo { name: "invert", aliases: &["negate"], parameter: None },
        OperationInfo {
            name: "grayscale",
            aliases: &["greyscale", "gray", "grey"],
            parameter: None,
        },
        OperationInfo { name: "blur", aliases: &[], parameter: Some("radius") },
        OperationInfo { name: "brightness", aliases: &[], parameter: Some("factor") },
        OperationInfo { name: "contrast", aliases: &[], parameter: Some("factor") },
        OperationInfo { name: "sharpen", aliases: &[], parameter: None },
        OperationInfo { name: "mirror", aliases: &[], parameter: None },
        OperationInfo { name: "flip", aliases: &["thumble"], parameter: None },
    ];

    /// Look up a catalogue entry by canonical name or alias, ignoring case
    /// and surrounding whitespace.
    pub fn lookup(name: &str) -> Option<&'static OperationInfo> {
        let key = name.trim().to_ascii_lowercase();
        Self::OPERATIONS.iter().find(|op| op.answers_to(&key))
    }

    /// Validated brightness constructor. `factor` must be finite.
    pub fn brightness(factor: f32) -> Result<Self> {
        check_factor(factor)?;
        Ok(Self::Brightness { factor })
    }

    /// Validated contrast constructor. `factor` must be finite.
    pub fn contrast(factor: f32) -> Result<Self> {
        check_factor(factor)?;
        Ok(Self::Contrast { factor })
    }

    /// Canonical lowercase name, as accepted by [`FilterSpec::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
            Self::Blur { .. } => "blur",
            Self::Brightness { .. } => "brightness",
            Self::Contrast { .. } => "contrast",
            Self::Sharpen => "sharpen",
            Self::MirrorHorizontal => "mirror",
            Self::FlipVertical => "flip",
        }
    }

    /// Resolve an operation name plus loose parameters into a spec.
    ///
    /// Names are matched case-insensitively. A `blur` without a radius uses
    /// `config.default_blur_radius`; `brightness` and `contrast` require a
    /// factor.
    pub fn from_name(name: &str, params: FilterParams, config: &EngineConfig) -> Result<Self> {
        let unknown = || RasterwerkError::UnknownOperation(name.to_string());
        let op = Self::lookup(name).ok_or_else(unknown)?;
        let spec = match op.name {
            "invert" => Self::Invert,
            "grayscale" => Self::Grayscale,
            "blur" => {
                let radius = match params.radius {
                    Some(r) if r < 0 => {
                        return Err(RasterwerkError::invalid_parameter(
                            "radius",
                            format!("must be non-negative, got {r}"),
                        ));
                    }
                    Some(r) => u32::try_from(r).map_err(|_| {
                        RasterwerkError::invalid_parameter("radius", format!("{r} is too large"))
                    })?,
                    None => config.default_blur_radius,
                };
                Self::Blur { radius }
            }
            "brightness" => Self::brightness(require_factor(params)?)?,
            "contrast" => Self::contrast(require_factor(params)?)?,
            "sharpen" => Self::Sharpen,
            "mirror" => Self::MirrorHorizontal,
            "flip" => Self::FlipVertical,
            _ => return Err(unknown()),
        };
        spec.validate(config)?;
        Ok(spec)
    }

    /// Check parameters against their documented ranges.
    ///
    /// Specs built directly from the enum bypass the validated constructors,
    /// so the dispatcher calls this before every application. The blur limit
    /// never exceeds [`MAX_BLUR_RADIUS`], even under an unvalidated config.
    pub fn validate(&self, config: &EngineConfig) -> Result<()> {
        match *self {
            Self::Blur { radius } => {
                let limit = config.max_blur_radius.min(MAX_BLUR_RADIUS);
                if radius > limit {
                    return Err(RasterwerkError::invalid_parameter(
                        "radius",
                        format!("{radius} exceeds the maximum of {limit}"),
                    ));
                }
                Ok(())
            }
            Self::Brightness { factor } | Self::Contrast { factor } => check_factor(factor),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blur { radius } => write!(f, "blur(radius={radius})"),
            Self::Brightness { factor } => write!(f, "brightness(factor={factor})"),
            Self::Contrast { factor } => write!(f, "contrast(factor={factor})"),
            other => f.write_str(other.name()),
        }
    }
}

fn check_factor(factor: f32) -> Result<()> {
    if !factor.is_finite() {
        return Err(RasterwerkError::invalid_parameter(
            "factor",
            format!("must be finite, got {factor}"),
        ));
    }
    Ok(())
}

fn require_factor(params: FilterParams) -> Result<f32> {
    params
        .factor
        .ok_or_else(|| RasterwerkError::invalid_parameter("factor", "required for this operation"))
}
