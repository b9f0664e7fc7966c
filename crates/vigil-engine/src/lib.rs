// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis orchestration for the Vigil credential engine.
//!
//! - [`trace`]: the user-facing trace log and its fixed narrative.
//! - [`pipeline`]: the analysis state machine with its stale-run guard.
//! - [`boost`]: automatic and manual strengthening.
//! - [`workbench`]: one handle over pipeline, boost and vault.

pub mod boost;
pub mod pipeline;
pub mod trace;
pub mod workbench;

pub use boost::{BoostCoordinator, BoostSettings};
pub use pipeline::{
    AnalysisPipeline, AnalysisRun, AnalysisStatus, BoostTarget, PipelineSettings, TraceMode,
};
pub use trace::{Severity, TraceLine, TraceLog};
pub use workbench::{EngineSettings, Workbench};
