// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rasterwerk-batch: Applies one filter across many rasters with per-item
// failure isolation and timing.

pub mod orchestrator;

pub use orchestrator::BatchOrchestrator;
