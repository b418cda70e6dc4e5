// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch orchestrator: applies one filter spec across many independent
// rasters on a bounded rayon pool.
//
// Every item is processed in isolation: a failure is recorded in that item's
// result and never aborts its siblings. Results are collected by input index,
// so output order always equals input order regardless of which worker
// finishes first.

use std::time::Instant;

use chrono::Utc;
use rasterwerk_core::batch::{BatchId, BatchItem, BatchResponse, BatchResult};
use rasterwerk_core::config::EngineConfig;
use rasterwerk_core::error::{RasterwerkError, Result};
use rasterwerk_core::filter::{FilterParams, FilterSpec};
use rasterwerk_filters::FilterDispatcher;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument, warn};

/// Runs batches of filter applications.
pub struct BatchOrchestrator {
    dispatcher: FilterDispatcher,
    /// `None` when configured for a single worker: items then run
    /// sequentially on the calling thread.
    pool: Option<ThreadPool>,
}

impl BatchOrchestrator {
    /// Build an orchestrator and, unless `worker_threads == 1`, its pool.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let pool = if config.worker_threads == 1 {
            None
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.worker_threads)
                .thread_name(|i| format!("rasterwerk-batch-{i}"))
                .build()
                .map_err(|e| RasterwerkError::Config(format!("worker pool: {e}")))?;
            Some(pool)
        };
        info!(
            workers = pool.as_ref().map_or(1, |p| p.current_num_threads()),
            "Batch orchestrator ready"
        );
        Ok(Self {
            dispatcher: FilterDispatcher::new(config),
            pool,
        })
    }

    /// Sequential orchestrator with default settings.
    pub fn sequential() -> Self {
        Self {
            dispatcher: FilterDispatcher::new(EngineConfig {
                worker_threads: 1,
                ..EngineConfig::default()
            }),
            pool: None,
        }
    }

    pub fn dispatcher(&self) -> &FilterDispatcher {
        &self.dispatcher
    }

    /// Number of items that may be processed at once.
    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    /// Apply `spec` (or an item's own override) to every item.
    ///
    /// Always returns exactly one result per item, in input order.
    #[instrument(skip(self, items), fields(items = items.len(), operation = %spec))]
    pub fn process_batch(&self, items: Vec<BatchItem>, spec: FilterSpec) -> BatchResponse {
        let batch_id = BatchId::new();
        let started_at = Utc::now();
        let start = Instant::now();
        info!(%batch_id, "Processing batch");

        let results: Vec<BatchResult> = match &self.pool {
            Some(pool) => pool.install(|| {
                items
                    .into_par_iter()
                    .map(|item| self.process_item(item, &spec))
                    .collect()
            }),
            None => items
                .into_iter()
                .map(|item| self.process_item(item, &spec))
                .collect(),
        };

        let response = BatchResponse {
            batch_id,
            operation: spec,
            started_at,
            results,
            total_elapsed: start.elapsed(),
        };
        info!(
            %batch_id,
            succeeded = response.succeeded(),
            failed = response.failed(),
            elapsed_ms = response.total_elapsed.as_millis() as u64,
            "Batch complete"
        );
        response
    }

    /// String-keyed variant of [`BatchOrchestrator::process_batch`].
    ///
    /// An unknown name or bad parameter is a caller error for the whole
    /// batch, so it is returned directly rather than per item.
    pub fn process_named(
        &self,
        items: Vec<BatchItem>,
        name: &str,
        params: FilterParams,
    ) -> Result<BatchResponse> {
        let spec = FilterSpec::from_name(name, params, self.dispatcher.config())?;
        Ok(self.process_batch(items, spec))
    }

    fn process_item(&self, item: BatchItem, batch_spec: &FilterSpec) -> BatchResult {
        let start = Instant::now();
        let spec = item.spec_override.as_ref().unwrap_or(batch_spec);

        let outcome = match &item.buffer {
            Some(buffer) => self.dispatcher.apply(buffer, spec),
            None => Err(RasterwerkError::MissingBuffer(item.id.clone())),
        };
        let elapsed = start.elapsed();

        match &outcome {
            Ok(_) => debug!(id = %item.id, elapsed_us = elapsed.as_micros() as u64, "Item processed"),
            Err(err) => warn!(id = %item.id, error = %err, "Item failed"),
        }

        BatchResult {
            id: item.id,
            outcome: outcome.map_err(Into::into),
            elapsed,
        }
    }
}
