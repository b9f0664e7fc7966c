// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline fallback decorator.
//!
//! Replaces collaborator failures from the wrapped advisor with canned
//! payloads, so the engine keeps working without network access. Opt-in via
//! `gemini.offline_fallback`; with it enabled the pipeline never reaches
//! its error state.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;
use vigil_core::{
    AdapterType, AdvisorAdapter, AnalysisResult, HealthStatus, PluginAdapter, StrengthenResult,
    Substitution, SuggestionSet, VigilError,
};

pub struct FallbackAdvisor {
    inner: Arc<dyn AdvisorAdapter>,
}

impl FallbackAdvisor {
    pub fn new(inner: Arc<dyn AdvisorAdapter>) -> Self {
        Self { inner }
    }
}

/// Evaluation reported when the advisor is unreachable.
pub fn offline_evaluation() -> AnalysisResult {
    let mut result = AnalysisResult::new(10.0, vec!["Connection Failure".to_string()]);
    result.crack_time = "Unknown (API Error)".to_string();
    result.weaknesses = vec!["Unable to perform deep scan".to_string()];
    result.ai_insight = "System offline. Unable to verify pattern integrity.".to_string();
    result.breach_probability = "Unknown".to_string();
    result
}

/// Mechanical strengthening used when the advisor is unreachable.
pub fn offline_strengthen<R: Rng + ?Sized>(text: &str, rng: &mut R) -> StrengthenResult {
    StrengthenResult {
        strengthened_text: format!("{text}!!SECURE{}", rng.gen_range(0..100)),
        explanation: "Fallback enhancement applied.".to_string(),
    }
}

/// Generic building blocks used when the advisor is unreachable.
pub fn offline_suggestions() -> SuggestionSet {
    SuggestionSet {
        symbols: ["!", "#", "@", "$", "%", "&"].map(String::from).to_vec(),
        suffixes: ["2024", "99", "!X", "Secure"].map(String::from).to_vec(),
        substitutions: vec![Substitution::new("a", "@"), Substitution::new("e", "3")],
    }
}

#[async_trait]
impl PluginAdapter for FallbackAdvisor {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> semver::Version {
        self.inner.version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Advisor
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        match self.inner.health_check().await {
            Ok(HealthStatus::Healthy) => Ok(HealthStatus::Healthy),
            Ok(HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason)) => Ok(
                HealthStatus::Degraded(format!("serving offline fallback: {reason}")),
            ),
            Err(e) => Ok(HealthStatus::Degraded(format!("serving offline fallback: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        self.inner.shutdown().await
    }
}

#[async_trait]
impl AdvisorAdapter for FallbackAdvisor {
    async fn evaluate_risk(&self, text: &str) -> Result<AnalysisResult, VigilError> {
        match self.inner.evaluate_risk(text).await {
            Err(e) if e.is_collaborator_failure() => {
                warn!(error = %e, "evaluation failed, using offline result");
                Ok(offline_evaluation())
            }
            other => other,
        }
    }

    async fn strengthen(&self, text: &str) -> Result<StrengthenResult, VigilError> {
        match self.inner.strengthen(text).await {
            Err(e) if e.is_collaborator_failure() => {
                warn!(error = %e, "strengthen failed, using offline result");
                Ok(offline_strengthen(text, &mut rand::thread_rng()))
            }
            other => other,
        }
    }

    async fn suggest(&self, text: &str) -> Result<SuggestionSet, VigilError> {
        match self.inner.suggest(text).await {
            Err(e) if e.is_collaborator_failure() => {
                warn!(error = %e, "suggestion fetch failed, using offline set");
                Ok(offline_suggestions())
            }
            other => other,
        }
    }
}
