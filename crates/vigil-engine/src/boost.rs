// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boost coordinator: automatic strengthening and manual tactical sessions.
//!
//! Both strategies are offered only while the current run is `Complete`
//! below the boost threshold. A single in-flight flag keeps the two
//! strategies from fetching at the same time. A failed fetch logs one trace
//! line and leaves the completed run untouched. A fetch that outlives its run
//! (a newer analysis or a reset started meanwhile) is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};
use vigil_config::model::BoostConfig;
use vigil_core::VigilError;
use vigil_mutation::MutationSession;

use crate::pipeline::{AnalysisPipeline, AnalysisRun, TraceMode};
use crate::trace::{text, Severity};

#[derive(Debug, Clone, Copy)]
pub struct BoostSettings {
    pub auto_warmup: Duration,
}

impl Default for BoostSettings {
    fn default() -> Self {
        Self {
            auto_warmup: Duration::from_millis(2500),
        }
    }
}

impl From<&BoostConfig> for BoostSettings {
    fn from(config: &BoostConfig) -> Self {
        Self {
            auto_warmup: Duration::from_millis(config.auto_warmup_ms),
        }
    }
}

#[derive(Debug, Default)]
pub struct BoostCoordinator {
    settings: BoostSettings,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the fetch ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl BoostCoordinator {
    pub fn new(settings: BoostSettings) -> Self {
        Self {
            settings,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a strengthen or suggestion fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Result<InFlight<'_>, VigilError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| VigilError::BoostInFlight)
    }

    /// Strengthen the current target and re-run the analysis on the result.
    pub async fn auto(&self, pipeline: &AnalysisPipeline) -> Result<AnalysisRun, VigilError> {
        let base = pipeline.boost_target().await?;
        let strengthened = {
            let _guard = self.acquire()?;
            info!(score = base.score, sequence = base.sequence, "auto boost started");
            pipeline.log(text::AUTO_START, Severity::Info).await;
            if pipeline.settings().simulate_delays {
                tokio::time::sleep(self.settings.auto_warmup).await;
            }
            pipeline.ensure_current(base.sequence)?;
            pipeline.log(text::AUTO_ANALYZE, Severity::Info).await;

            match pipeline.advisor().strengthen(&base.target).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "auto boost failed");
                    pipeline.log(text::AUTO_FAILED, Severity::Error).await;
                    return Err(e);
                }
            }
        };
        pipeline.ensure_current(base.sequence)?;

        pipeline
            .log(text::optimized(&strengthened.explanation), Severity::Success)
            .await;
        pipeline.log(text::AUTO_APPLY, Severity::Success).await;
        pipeline
            .run_analysis(&strengthened.strengthened_text, TraceMode::Preserve)
            .await
    }

    /// Fetch suggestions and open a tactical session over the current target.
    pub async fn manual(&self, pipeline: &AnalysisPipeline) -> Result<MutationSession, VigilError> {
        let base = pipeline.boost_target().await?;
        let _guard = self.acquire()?;
        debug!(score = base.score, sequence = base.sequence, "manual boost started");

        match pipeline.advisor().suggest(&base.target).await {
            Ok(suggestions) => {
                pipeline.ensure_current(base.sequence)?;
                Ok(MutationSession::new(base.target, suggestions))
            }
            Err(e) => {
                warn!(error = %e, "suggestion fetch failed");
                pipeline.log(text::MANUAL_FAILED, Severity::Error).await;
                Err(e)
            }
        }
    }

    /// End a tactical session and analyze its buffer.
    pub async fn commit(
        &self,
        pipeline: &AnalysisPipeline,
        session: MutationSession,
    ) -> Result<AnalysisRun, VigilError> {
        pipeline.log(text::MANUAL_COMMITTED, Severity::Success).await;
        pipeline
            .run_analysis(&session.into_buffer(), TraceMode::Preserve)
            .await
    }

    /// Drop a tactical session. The last analyzed target stays authoritative.
    pub fn cancel(&self, session: MutationSession) {
        debug!(buffer_len = session.buffer().chars().count(), "tactical session cancelled");
        drop(session);
    }
}
