// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterwerk: Core types and error definitions shared across all crates.

pub mod batch;
pub mod config;
pub mod error;
pub mod filter;
pub mod types;

pub use batch::{BatchId, BatchItem, BatchResponse, BatchResult, BatchSummary, ItemError};
pub use config::{EngineConfig, MAX_BLUR_RADIUS};
pub use error::{ErrorKind, RasterwerkError};
pub use filter::{FilterParams, FilterSpec, OperationInfo};
pub use types::*;
