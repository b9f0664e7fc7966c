// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock advisor adapter for deterministic testing.
//!
//! `MockAdvisor` implements `AdvisorAdapter` with scripted replies. Each
//! operation has its own FIFO queue; when a queue is empty a fixed default
//! reply is returned.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vigil_core::{
    AdapterType, AdvisorAdapter, AnalysisResult, HealthStatus, PluginAdapter, StrengthenResult,
    Substitution, SuggestionSet, VigilError,
};

/// One scripted reply: an outcome and how long to wait before giving it.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    delay: Duration,
    outcome: Result<T, String>,
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(value),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(message.into()),
        }
    }

    /// Delay the reply. Under a paused tokio clock this advances virtual time.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug)]
struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Script<T> {
    async fn next(&self, input: &str, latency: Duration) -> Option<Result<T, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().await.push(input.to_string());
        let reply = self.replies.lock().await.pop_front();
        let delay = reply.as_ref().map_or(latency, |r| r.delay.max(latency));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.map(|r| r.outcome)
    }
}

/// A mock advisor that returns scripted replies.
#[derive(Debug, Default)]
pub struct MockAdvisor {
    evaluations: Script<AnalysisResult>,
    strengthens: Script<StrengthenResult>,
    suggestions: Script<SuggestionSet>,
    latency: Duration,
}

impl MockAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a minimum delay to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn push_evaluation(&self, reply: Reply<AnalysisResult>) {
        self.evaluations.replies.lock().await.push_back(reply);
    }

    pub async fn push_strengthen(&self, reply: Reply<StrengthenResult>) {
        self.strengthens.replies.lock().await.push_back(reply);
    }

    pub async fn push_suggestions(&self, reply: Reply<SuggestionSet>) {
        self.suggestions.replies.lock().await.push_back(reply);
    }

    pub fn evaluate_calls(&self) -> usize {
        self.evaluations.calls.load(Ordering::SeqCst)
    }

    pub fn strengthen_calls(&self) -> usize {
        self.strengthens.calls.load(Ordering::SeqCst)
    }

    pub fn suggest_calls(&self) -> usize {
        self.suggestions.calls.load(Ordering::SeqCst)
    }

    /// Texts passed to `evaluate_risk`, in call order.
    pub async fn evaluated_texts(&self) -> Vec<String> {
        self.evaluations.inputs.lock().await.clone()
    }

    /// The suggestion set returned when no reply is scripted.
    pub fn default_suggestions() -> SuggestionSet {
        SuggestionSet {
            symbols: vec!["!".into(), "#".into()],
            suffixes: vec!["2024".into()],
            substitutions: vec![Substitution::new("a", "@"), Substitution::new("e", "3")],
        }
    }
}

#[async_trait]
impl PluginAdapter for MockAdvisor {
    fn name(&self) -> &str {
        "mock-advisor"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Advisor
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        Ok(())
    }
}

#[async_trait]
impl AdvisorAdapter for MockAdvisor {
    async fn evaluate_risk(&self, text: &str) -> Result<AnalysisResult, VigilError> {
        match self.evaluations.next(text, self.latency).await {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(VigilError::evaluation(message)),
            None => Ok(AnalysisResult::new(50.0, Vec::new())),
        }
    }

    async fn strengthen(&self, text: &str) -> Result<StrengthenResult, VigilError> {
        match self.strengthens.next(text, self.latency).await {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(VigilError::strengthen(message)),
            None => Ok(StrengthenResult {
                strengthened_text: format!("{text}#M0ck!"),
                explanation: "mock strengthen".to_string(),
            }),
        }
    }

    async fn suggest(&self, text: &str) -> Result<SuggestionSet, VigilError> {
        match self.suggestions.next(text, self.latency).await {
            Some(Ok(set)) => Ok(set),
            Some(Err(message)) => Err(VigilError::suggest(message)),
            None => Ok(Self::default_suggestions()),
        }
    }
}
