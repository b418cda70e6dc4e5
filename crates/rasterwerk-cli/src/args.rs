// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use rasterwerk_core::FilterParams;

/// Apply one raster filter to a batch of image files.
#[derive(Debug, Parser)]
#[command(name = "rasterwerk", version, about)]
pub struct Args {
    /// Operation: invert, grayscale, blur, brightness, contrast, sharpen,
    /// mirror, or flip. See `--list` for aliases.
    #[arg(required_unless_present = "list")]
    pub operation: Option<String>,

    /// Blur radius. Defaults to the configured `default_blur_radius`.
    #[arg(long, allow_negative_numbers = true)]
    pub radius: Option<i64>,

    /// Brightness or contrast factor.
    #[arg(long, allow_negative_numbers = true)]
    pub factor: Option<f32>,

    /// JSON engine configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that receives the filtered PNG files.
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Worker threads (overrides the configuration; 1 = sequential).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Print the available operations as JSON and exit.
    #[arg(long)]
    pub list: bool,

    /// Input images.
    #[arg(required_unless_present = "list")]
    pub inputs: Vec<PathBuf>,
}

impl Args {
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            radius: self.radius,
            factor: self.factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_negative_factor() {
        let args =
            Args::try_parse_from(["rasterwerk", "brightness", "--factor", "-5", "a.png", "b.png"])
                .unwrap();
        assert_eq!(args.operation.as_deref(), Some("brightness"));
        assert_eq!(args.factor, Some(-5.0));
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }

    #[test]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["rasterwerk", "invert"]).is_err());
        assert!(Args::try_parse_from(["rasterwerk"]).is_err());
    }

    #[test]
    fn list_needs_nothing_else() {
        let args = Args::try_parse_from(["rasterwerk", "--list"]).unwrap();
        assert!(args.list);
        assert!(args.operation.is_none());
        assert!(args.inputs.is_empty());
    }
}
