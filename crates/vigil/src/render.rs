// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for trace lines, results and vault listings.

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use vigil_core::{AnalysisResult, CredentialEntry};
use vigil_engine::{Severity, TraceLine};
use vigil_mutation::MutationSession;
use vigil_vault::{mask_secret, ExpiryReport, ExpiryStatus};

pub fn trace_line(line: &TraceLine) -> String {
    let text = match line.severity {
        Severity::Info => line.text.normal(),
        Severity::Warning => line.text.yellow(),
        Severity::Error => line.text.red(),
        Severity::Success => line.text.green(),
    };
    format!("{} {text}", format!("[{}]", line.time_label()).dimmed())
}

/// Prints trace lines not yet shown, tracking the last printed id.
#[derive(Debug, Default)]
pub struct TracePrinter {
    last_id: Option<String>,
}

impl TracePrinter {
    /// Lines after the last printed one. If it is gone (trace cleared or
    /// rotated out), every line is new.
    pub fn unseen<'a>(&self, trace: &'a [TraceLine]) -> &'a [TraceLine] {
        let start = self
            .last_id
            .as_ref()
            .and_then(|id| trace.iter().position(|l| &l.id == id))
            .map_or(0, |i| i + 1);
        &trace[start..]
    }

    pub fn print(&mut self, trace: &[TraceLine]) {
        for line in self.unseen(trace) {
            println!("{}", trace_line(line));
        }
        if let Some(last) = trace.last() {
            self.last_id = Some(last.id.clone());
        }
    }
}

fn score_label(score: f64) -> ColoredString {
    let label = format!("{score:.0}/100");
    if score >= 80.0 {
        label.green().bold()
    } else if score >= 50.0 {
        label.yellow().bold()
    } else {
        label.red().bold()
    }
}

pub fn result_summary(result: &AnalysisResult) -> String {
    let mut out = format!("score: {}", score_label(result.score));
    if !result.crack_time.is_empty() {
        out.push_str(&format!("  crack time: {}", result.crack_time));
    }
    if !result.breach_probability.is_empty() {
        out.push_str(&format!("  breach risk: {}", result.breach_probability));
    }
    if !result.ai_insight.is_empty() {
        out.push_str(&format!("\n{}", result.ai_insight.italic()));
    }
    for weakness in &result.weaknesses {
        out.push_str(&format!("\n  {} {weakness}", "-".red()));
    }
    for strength in &result.strengths {
        out.push_str(&format!("\n  {} {strength}", "+".green()));
    }
    out
}

pub fn expiry_label(status: ExpiryStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ExpiryStatus::NoExpiry => label.dimmed(),
        ExpiryStatus::Expired => label.red().bold(),
        ExpiryStatus::ExpiringSoon(_) => label.yellow(),
        ExpiryStatus::Valid => label.green(),
    }
}

pub fn entry_row(entry: &CredentialEntry, status: ExpiryStatus) -> String {
    let score = entry
        .score
        .map_or_else(|| "--".to_string(), |s| format!("{s:.0}"));
    let mut row = format!(
        "{}  {:<24} {:<6} {:>3}  {}",
        entry.id.as_str().chars().take(8).collect::<String>().cyan(),
        mask_secret(&entry.secret_value),
        entry.capture_kind,
        score,
        expiry_label(status),
    );
    if let Some(description) = &entry.description {
        row.push_str(&format!("  {}", description.dimmed()));
    }
    row
}

pub fn entry_table<'a>(
    entries: impl IntoIterator<Item = &'a CredentialEntry>,
    classify: impl Fn(&CredentialEntry) -> ExpiryStatus,
) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry_row(entry, classify(entry)))
        .collect()
}

pub fn expiry_summary(report: &ExpiryReport, today: NaiveDate) -> String {
    format!(
        "{today}: {} valid, {} expiring, {} expired, {} without expiry",
        report.valid, report.expiring_soon, report.expired, report.no_expiry
    )
}

/// The tactical buffer plus every affordance with its index.
pub fn session_view(session: &MutationSession) -> String {
    let buffer = match session.preview() {
        Some(preview) => format!("{} {}", preview.yellow(), "(preview)".dimmed()),
        None => session.buffer().bold().to_string(),
    };
    let suggestions = session.suggestions();
    let mut out = format!("buffer: {buffer}");

    let list = |items: &[String]| {
        items
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{i}:{s}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    out.push_str(&format!("\n  /sym  {}", list(&suggestions.symbols)));
    out.push_str(&format!("\n  /suf  {}", list(&suggestions.suffixes)));

    let subs = suggestions
        .substitutions
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            let label = format!("{i}:{}->{}", sub.from, sub.to);
            if vigil_mutation::is_applicable(session.buffer(), &sub.from) {
                label.normal().to_string()
            } else {
                label.dimmed().strikethrough().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("\n  /sub  {subs}"));
    out
}
