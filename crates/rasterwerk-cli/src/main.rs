// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterwerk: Command-line raster filter tool
//
// Entry point. Initialises logging, parses arguments, runs the batch, and
// prints the JSON summary on stdout.

mod args;
mod runner;

use std::process::ExitCode;

use clap::Parser;

use args::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list {
        return match serde_json::to_string_pretty(rasterwerk_core::FilterSpec::OPERATIONS) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to render operations: {e}");
                ExitCode::FAILURE
            }
        };
    }
    tracing::info!(operation = ?args.operation, inputs = args.inputs.len(), "Rasterwerk starting");

    let summary = match runner::run(&args) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to render summary: {e}");
            return ExitCode::FAILURE;
        }
    }

    if summary.failed > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
