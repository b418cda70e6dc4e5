// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ties the codec bridge, the orchestrator, and the output directory together.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rasterwerk_batch::BatchOrchestrator;
use rasterwerk_core::batch::{BatchItem, BatchSummary, ItemError, ItemStatus};
use rasterwerk_core::{EngineConfig, FilterSpec};
use rasterwerk_filters::codec;
use tracing::{info, warn};

use crate::args::Args;

/// Decode the inputs, run the batch, and write each successful result.
///
/// Inputs that fail to decode still appear in the summary as failed items.
pub fn run(args: &Args) -> anyhow::Result<BatchSummary> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(threads) = args.threads {
        config.worker_threads = threads;
    }

    let operation = args.operation.as_deref().context("no operation given")?;
    let orchestrator = BatchOrchestrator::new(config)?;
    let spec = FilterSpec::from_name(
        operation,
        args.filter_params(),
        orchestrator.dispatcher().config(),
    )?;

    let items: Vec<BatchItem> = args.inputs.iter().map(|path| load_item(path)).collect();
    let response = orchestrator.process_batch(items, spec);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut summary = response.summary();
    let mut taken = HashSet::new();
    for (idx, (result, item)) in response
        .results
        .iter()
        .zip(summary.items.iter_mut())
        .enumerate()
    {
        let Ok(raster) = &result.outcome else {
            continue;
        };
        let target = output_path(&args.out_dir, &result.id, idx, &spec, &mut taken);
        match codec::save(raster, &target) {
            Ok(()) => info!(id = %result.id, path = %target.display(), "Wrote output"),
            Err(err) => {
                warn!(id = %result.id, error = %err, "Could not write output");
                item.status = ItemStatus::Error;
                item.error = Some(ItemError::from(err));
                item.dimensions = None;
                summary.succeeded -= 1;
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

fn load_item(path: &Path) -> BatchItem {
    let id = path.display().to_string();
    match codec::open(path) {
        Ok(raster) => BatchItem::new(id, raster),
        Err(err) => {
            warn!(id = %id, error = %err, "Input could not be decoded");
            BatchItem::missing(id)
        }
    }
}

/// `<out_dir>/<input stem>-<operation>.png`, or
/// `<out_dir>/<input stem>-<operation>-<index>.png` when an earlier input in
/// the batch already claimed that name.
fn output_path(
    out_dir: &Path,
    id: &str,
    idx: usize,
    spec: &FilterSpec,
    taken: &mut HashSet<PathBuf>,
) -> PathBuf {
    let stem = Path::new(id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let op = spec.name();
    let path = out_dir.join(format!("{stem}-{op}.png"));
    if taken.insert(path.clone()) {
        return path;
    }
    // Operation names never end in a digit, so this cannot clash with a
    // first-choice name.
    let path = out_dir.join(format!("{stem}-{op}-{idx}.png"));
    taken.insert(path.clone());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterwerk_core::{ErrorKind, Pixel, RasterBuffer};

    fn args(dir: &Path, operation: &str, inputs: Vec<PathBuf>) -> Args {
        Args {
            operation: Some(operation.to_string()),
            radius: None,
            factor: None,
            config: None,
            out_dir: dir.join("out"),
            threads: Some(2),
            list: false,
            inputs,
        }
    }

    #[test]
    fn undecodable_input_fails_alone() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("white.png");
        let white = RasterBuffer::filled(2, 2, Pixel::WHITE).unwrap();
        codec::save(&white, &good).unwrap();
        let bad = dir.path().join("broken.png");
        std::fs::write(&bad, b"not a png").unwrap();

        let summary = run(&args(dir.path(), "invert", vec![good, bad])).unwrap();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.items[0].status, ItemStatus::Success);
        assert_eq!(
            summary.items[1].error.as_ref().map(|e| e.kind),
            Some(ErrorKind::MissingBuffer)
        );

        let written = codec::open(dir.path().join("out").join("white-invert.png")).unwrap();
        assert!(written.pixels().iter().all(|p| *p == Pixel::new(0, 0, 0, 255)));
    }

    #[test]
    fn unknown_operation_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&args(dir.path(), "solarize", vec![dir.path().join("x.png")])).unwrap_err();
        let err = err.downcast::<rasterwerk_core::RasterwerkError>().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
    }

    #[test]
    fn output_names_follow_input_stem() {
        let mut taken = HashSet::new();
        let path = output_path(
            Path::new("/tmp/out"),
            "/data/cat.jpeg",
            0,
            &FilterSpec::Sharpen,
            &mut taken,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/cat-sharpen.png"));
    }

    #[test]
    fn same_stem_inputs_get_distinct_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = Vec::new();
        for (sub, pixel) in [("a", Pixel::WHITE), ("b", Pixel::BLACK)] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
            let path = dir.path().join(sub).join("cat.png");
            codec::save(&RasterBuffer::filled(2, 2, pixel).unwrap(), &path).unwrap();
            inputs.push(path);
        }

        let summary = run(&args(dir.path(), "invert", inputs)).unwrap();
        assert_eq!(summary.succeeded, 2);

        let out = dir.path().join("out");
        let first = codec::open(out.join("cat-invert.png")).unwrap();
        let second = codec::open(out.join("cat-invert-1.png")).unwrap();
        assert_eq!(first.pixels()[0], Pixel::BLACK);
        assert_eq!(second.pixels()[0], Pixel::WHITE);
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn failed_write_clears_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("white.png");
        codec::save(&RasterBuffer::filled(2, 2, Pixel::WHITE).unwrap(), &input).unwrap();

        // The would-be output path is occupied by a directory.
        let out = dir.path().join("out");
        std::fs::create_dir_all(out.join("white-invert.png")).unwrap();

        let summary = run(&args(dir.path(), "invert", vec![input])).unwrap();
        assert_eq!(summary.failed, 1);
        let item = &summary.items[0];
        assert_eq!(item.status, ItemStatus::Error);
        assert_eq!(item.error.as_ref().map(|e| e.kind), Some(ErrorKind::Codec));
        assert_eq!(item.dimensions, None);
    }
}
