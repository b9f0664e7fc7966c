// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis pipeline.
//!
//! A run plays the scripted progress steps and calls the risk evaluator
//! concurrently, then joins both before leaving `Scanning`. Every run is
//! tagged with a sequence number; a run that finishes after a newer one
//! started leaves the shared state alone and reports
//! [`VigilError::StaleResultDiscarded`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vigil_config::model::PipelineConfig;
use vigil_core::{AdvisorAdapter, AnalysisResult, VigilError};

use crate::trace::{text, Severity, TraceLine, TraceLog, SCAN_STEPS};

/// Status of the current analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Scanning,
    Complete,
    Error,
}

impl AnalysisStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

/// What happens to the existing trace when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Clear the trace.
    Fresh,
    /// Keep the trace and append a separator line.
    Preserve,
    /// Keep the trace as is.
    Continue,
}

/// Snapshot of the pipeline state.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub sequence: u64,
    pub status: AnalysisStatus,
    pub target_text: String,
    pub trace: Vec<TraceLine>,
    pub result: Option<AnalysisResult>,
}

impl AnalysisRun {
    pub fn score(&self) -> Option<f64> {
        self.result.as_ref().map(|r| r.score)
    }
}

/// Runtime knobs for the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub trace_capacity: usize,
    pub simulate_delays: bool,
    pub boost_threshold: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            trace_capacity: 50,
            simulate_delays: true,
            boost_threshold: 95.0,
        }
    }
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            trace_capacity: config.trace_capacity,
            simulate_delays: config.simulate_delays,
            boost_threshold: config.boost_threshold,
        }
    }
}

#[derive(Debug)]
struct RunState {
    sequence: u64,
    status: AnalysisStatus,
    target_text: String,
    trace: TraceLog,
    result: Option<AnalysisResult>,
}

impl RunState {
    fn snapshot(&self) -> AnalysisRun {
        AnalysisRun {
            sequence: self.sequence,
            status: self.status,
            target_text: self.target_text.clone(),
            trace: self.trace.to_vec(),
            result: self.result.clone(),
        }
    }
}

/// A completed run that is eligible for a boost.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostTarget {
    /// Sequence of the run the target was read from.
    pub sequence: u64,
    pub target: String,
    pub score: f64,
}

pub struct AnalysisPipeline {
    advisor: Arc<dyn AdvisorAdapter>,
    settings: PipelineSettings,
    state: Arc<Mutex<RunState>>,
    latest: AtomicU64,
}

impl AnalysisPipeline {
    pub fn new(advisor: Arc<dyn AdvisorAdapter>, settings: PipelineSettings) -> Self {
        let state = RunState {
            sequence: 0,
            status: AnalysisStatus::Idle,
            target_text: String::new(),
            trace: TraceLog::new(settings.trace_capacity),
            result: None,
        };
        Self {
            advisor,
            settings,
            state: Arc::new(Mutex::new(state)),
            latest: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Evaluate `target`, returning the terminal snapshot of this run.
    ///
    /// Evaluator failures move the run to `Error` and are returned as-is.
    /// An empty target appends one error line and changes nothing else.
    pub async fn run_analysis(
        &self,
        target: &str,
        mode: TraceMode,
    ) -> Result<AnalysisRun, VigilError> {
        if target.is_empty() {
            self.log(text::EMPTY_INPUT, Severity::Error).await;
            return Err(VigilError::EmptyInput);
        }

        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            match mode {
                TraceMode::Fresh => state.trace.clear(),
                TraceMode::Preserve => state.trace.push(text::REEVALUATE, Severity::Info),
                TraceMode::Continue => {}
            }
            state.sequence = sequence;
            state.status = AnalysisStatus::Scanning;
            state.target_text = target.to_string();
            state.result = None;
        }
        info!(sequence, "analysis started");

        let (_, outcome) = tokio::join!(
            self.play_steps(sequence),
            self.advisor.evaluate_risk(target)
        );

        let mut state = self.state.lock().await;
        if state.sequence != sequence {
            let latest = self.latest.load(Ordering::SeqCst);
            debug!(sequence, latest, "discarding superseded analysis");
            return Err(VigilError::StaleResultDiscarded { sequence, latest });
        }

        match outcome {
            Ok(result) => {
                for vector in &result.attack_vectors {
                    state.trace.push(text::vulnerability(vector), Severity::Error);
                }
                state.trace.push(text::ANALYSIS_COMPLETE, Severity::Success);
                state.trace.push(text::REPORT, Severity::Success);
                info!(sequence, score = result.score, "analysis complete");
                state.result = Some(result);
                state.status = AnalysisStatus::Complete;
                Ok(state.snapshot())
            }
            Err(e) => {
                warn!(sequence, error = %e, "risk evaluation failed");
                state.trace.push(text::EVALUATION_FAILED, Severity::Error);
                state.status = AnalysisStatus::Error;
                Err(e)
            }
        }
    }

    async fn play_steps(&self, sequence: u64) {
        for step in SCAN_STEPS.iter() {
            if self.settings.simulate_delays {
                tokio::time::sleep(step.delay).await;
            }
            let mut state = self.state.lock().await;
            if state.sequence != sequence {
                return;
            }
            state.trace.push(step.text, step.severity);
        }
    }

    /// Return to `Idle`. Any run still in flight becomes stale.
    pub async fn reset(&self) {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.lock().await;
        state.sequence = sequence;
        state.status = AnalysisStatus::Idle;
        state.target_text.clear();
        state.result = None;
        state.trace.clear();
        state.trace.push(text::RESET, Severity::Info);
        debug!(sequence, "pipeline reset");
    }

    /// Drop every trace line. Status and result are kept.
    pub async fn clear_trace(&self) {
        self.state.lock().await.trace.clear();
    }

    /// Append a line to the trace without touching the run state.
    pub async fn log(&self, line: impl Into<String>, severity: Severity) {
        self.state.lock().await.trace.push(line, severity);
    }

    pub async fn snapshot(&self) -> AnalysisRun {
        self.state.lock().await.snapshot()
    }

    pub async fn status(&self) -> AnalysisStatus {
        self.state.lock().await.status
    }

    /// Target and score of the current run if a boost may be offered.
    pub async fn boost_target(&self) -> Result<BoostTarget, VigilError> {
        let state = self.state.lock().await;
        if state.status != AnalysisStatus::Complete {
            return Err(VigilError::BoostUnavailable(format!(
                "analysis is {}",
                state.status
            )));
        }
        let score = state.result.as_ref().map(|r| r.score).ok_or_else(|| {
            VigilError::Internal("complete run without a result".to_string())
        })?;
        if score >= self.settings.boost_threshold {
            return Err(VigilError::BoostUnavailable(format!(
                "score {score} already meets threshold {}",
                self.settings.boost_threshold
            )));
        }
        Ok(BoostTarget {
            sequence: state.sequence,
            target: state.target_text.clone(),
            score,
        })
    }

    /// Fails with `StaleResultDiscarded` once a newer run or a reset has
    /// superseded `sequence`.
    pub fn ensure_current(&self, sequence: u64) -> Result<(), VigilError> {
        let latest = self.latest.load(Ordering::SeqCst);
        if latest != sequence {
            debug!(sequence, latest, "discarding work for superseded analysis");
            return Err(VigilError::StaleResultDiscarded { sequence, latest });
        }
        Ok(())
    }

    pub fn advisor(&self) -> &Arc<dyn AdvisorAdapter> {
        &self.advisor
    }
}
