// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing trace log.
//!
//! The trace is the narrative shown next to an analysis. It is a domain
//! artifact, separate from diagnostic logging, though every append is also
//! emitted at debug level.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Severity of a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceLine {
    pub id: String,
    pub text: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl TraceLine {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            text: text.into(),
            severity,
            timestamp: Utc::now(),
        }
    }

    /// Wall-clock time as `HH:MM:SS.mmm` (UTC).
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }
}

/// Bounded, append-only log. The oldest lines are dropped past capacity.
#[derive(Debug, Clone)]
pub struct TraceLog {
    lines: VecDeque<TraceLine>,
    capacity: usize,
}

impl TraceLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, severity: Severity) {
        let line = TraceLine::new(text, severity);
        debug!(severity = %line.severity, text = %line.text, "trace");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceLine> {
        self.lines.iter()
    }

    pub fn to_vec(&self) -> Vec<TraceLine> {
        self.lines.iter().cloned().collect()
    }
}

/// One scripted progress step played while the evaluator runs.
#[derive(Debug, Clone, Copy)]
pub struct TraceStep {
    pub delay: Duration,
    pub severity: Severity,
    pub text: &'static str,
}

const fn step(ms: u64, severity: Severity, text: &'static str) -> TraceStep {
    TraceStep {
        delay: Duration::from_millis(ms),
        severity,
        text,
    }
}

/// Progress narrative of an analysis run, in playback order.
pub const SCAN_STEPS: [TraceStep; 7] = [
    step(200, Severity::Info, "Connecting to neural analysis engine..."),
    step(300, Severity::Info, "Simulating: DICTIONARY ATTACK Vectors..."),
    step(300, Severity::Info, "Simulating: RAINBOW TABLE Lookups..."),
    step(300, Severity::Warning, "Simulating: SOCIAL ENGINEERING Patterns..."),
    step(400, Severity::Info, "Simulating: BRUTE FORCE Permutations..."),
    step(300, Severity::Info, "Simulating: MASK ATTACK Combinations..."),
    step(300, Severity::Success, "Aggregating vulnerability data..."),
];

/// Fixed trace texts.
pub mod text {
    pub const EMPTY_INPUT: &str = "Input empty. Aborting.";
    pub const REEVALUATE: &str = "--- RE-EVALUATING NEW TARGET ---";
    pub const ANALYSIS_COMPLETE: &str = "Analysis complete. Rendering dashboard.";
    pub const REPORT: &str = "Generating Security Health Report...";
    pub const EVALUATION_FAILED: &str = "Connection to AI Core failed.";
    pub const RESET: &str = "System reset. Ready.";
    pub const SYSTEM_READY: &str = "System initialized.";

    pub const AUTO_START: &str = "Initiating AUTO-BOOST protocol...";
    pub const AUTO_ANALYZE: &str = "Analyzing base patterns for fortification...";
    pub const AUTO_APPLY: &str = "Applying fortified credentials...";
    pub const AUTO_FAILED: &str = "Enhancement algorithm failed. Try again.";
    pub const MANUAL_FAILED: &str = "Failed to initialize tactical module.";
    pub const MANUAL_COMMITTED: &str = "Manual configuration committed.";

    pub const VOICE_CAPTURED: &str = "Audio frequency encoded to hash.";
    pub const RETINA_CAPTURED: &str = "Retina scan validated & hashed.";
    pub const BIO_CAPTURED: &str = "Biometric fingerprint tokenized.";

    pub const VAULT_DUPLICATE: &str = "Credential already exists in vault.";
    pub const VAULT_ENCRYPTING: &str = "Encrypting data packet [AES-256]...";
    pub const VAULT_TRASHED: &str = "Credential moved to recycle bin.";
    pub const VAULT_RESTORED: &str = "Credential restored from recycle bin.";
    pub const VAULT_PURGED: &str = "Credential permanently shredded from system.";
    pub const VAULT_EXPIRY: &str = "Expiration policy updated for credential.";

    pub fn vulnerability(vector: &str) -> String {
        format!(">> VULNERABILITY CONFIRMED: {vector}")
    }

    pub fn optimized(explanation: &str) -> String {
        format!("Optimization Success: {explanation}")
    }

    pub fn archived(kind: &str) -> String {
        format!("Credential securely archived to vault [TYPE: {}].", kind.to_uppercase())
    }

    pub fn copied(short_id: &str) -> String {
        format!("Credential [{short_id}...] copied to clipboard.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_drops_oldest() {
        let mut log = TraceLog::new(3);
        for i in 0..5 {
            log.push(format!("line {i}"), Severity::Info);
        }
        let texts: Vec<_> = log.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn ids_are_unique() {
        let mut log = TraceLog::new(10);
        log.push("a", Severity::Info);
        log.push("a", Severity::Info);
        let lines = log.to_vec();
        assert_ne!(lines[0].id, lines[1].id);
    }

    #[test]
    fn time_label_has_millis() {
        let line = TraceLine::new("x", Severity::Success);
        let label = line.time_label();
        assert_eq!(label.len(), 12);
        assert_eq!(&label[8..9], ".");
    }

    #[test]
    fn step_script_totals() {
        let total: Duration = SCAN_STEPS.iter().map(|s| s.delay).sum();
        assert_eq!(total, Duration::from_millis(2100));
        assert_eq!(SCAN_STEPS[3].severity, Severity::Warning);
        assert_eq!(SCAN_STEPS[6].severity, Severity::Success);
    }

    proptest::proptest! {
        #[test]
        fn log_keeps_newest_lines(capacity in 1usize..20, pushes in 0usize..60) {
            let mut log = TraceLog::new(capacity);
            for i in 0..pushes {
                log.push(i.to_string(), Severity::Info);
            }
            proptest::prop_assert_eq!(log.len(), pushes.min(capacity));
            let first = pushes.saturating_sub(capacity);
            let texts: Vec<String> = log.iter().map(|l| l.text.clone()).collect();
            let expected: Vec<String> = (first..pushes).map(|i| i.to_string()).collect();
            proptest::prop_assert_eq!(texts, expected);
        }
    }

    #[test]
    fn formatted_texts() {
        assert_eq!(text::archived("voice"), "Credential securely archived to vault [TYPE: VOICE].");
        assert_eq!(text::copied("ab12"), "Credential [ab12...] copied to clipboard.");
        assert_eq!(text::vulnerability("Brute Force"), ">> VULNERABILITY CONFIRMED: Brute Force");
    }
}
