// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch input/output types shared by the orchestrator and its callers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorKind, RasterwerkError};
use crate::filter::FilterSpec;
use crate::types::RasterBuffer;

/// Unique identifier for one batch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One image submitted to a batch.
///
/// `buffer` is `None` when the caller could not produce a raster, e.g. the
/// upload failed to decode. Such items fail individually with
/// `MissingBuffer`.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub id: String,
    pub buffer: Option<RasterBuffer>,
    /// Replaces the batch-wide spec for this item only.
    pub spec_override: Option<FilterSpec>,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, buffer: RasterBuffer) -> Self {
        Self {
            id: id.into(),
            buffer: Some(buffer),
            spec_override: None,
        }
    }

    /// An item whose raster could not be obtained.
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            buffer: None,
            spec_override: None,
        }
    }

    pub fn with_spec(mut self, spec: FilterSpec) -> Self {
        self.spec_override = Some(spec);
        self
    }
}

/// Per-item failure: a stable kind plus the rendered error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<RasterwerkError> for ItemError {
    fn from(err: RasterwerkError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of one item, in input order.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub id: String,
    pub outcome: Result<RasterBuffer, ItemError>,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Everything produced by one batch call.
#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub batch_id: BatchId,
    pub operation: FilterSpec,
    pub started_at: DateTime<Utc>,
    /// One entry per input item, in input order.
    pub results: Vec<BatchResult>,
    /// Wall-clock span of the whole call (not the sum of item times).
    pub total_elapsed: Duration,
}

impl BatchResponse {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Serializable report without pixel data.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            batch_id: self.batch_id,
            operation: self.operation.to_string(),
            started_at: self.started_at,
            total_elapsed_ms: millis(self.total_elapsed),
            succeeded: self.succeeded(),
            failed: self.failed(),
            items: self.results.iter().map(ItemSummary::from).collect(),
        }
    }
}

/// JSON-friendly view of a [`BatchResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub operation: String,
    pub started_at: DateTime<Utc>,
    pub total_elapsed_ms: f64,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    pub elapsed_ms: f64,
}

impl From<&BatchResult> for ItemSummary {
    fn from(result: &BatchResult) -> Self {
        let (status, error, dimensions) = match &result.outcome {
            Ok(raster) => (ItemStatus::Success, None, Some(raster.dimensions())),
            Err(err) => (ItemStatus::Error, Some(err.clone()), None),
        };
        Self {
            id: result.id.clone(),
            status,
            error,
            dimensions,
            elapsed_ms: millis(result.elapsed),
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
