// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for `vigil.toml`.
//!
//! The schema is five flat tables ([`SECTIONS`]) of scalar keys, so a span is
//! either a `[section]` header or a `key = …` line inside one. Values taken
//! from `VIGIL_*` variables have no span; their diagnostics name the
//! variable instead.

#![allow(unused_assignments)] // miette's Diagnostic derive triggers this lint

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::loader::{env_var_for, SECTIONS};

/// Jaro-Winkler similarity above which a correction is offered.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Source name used for configuration parsed from a string.
pub const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A table (or top-level key) outside the five known sections.
    #[error("unknown section `{section}`")]
    #[diagnostic(
        code(vigil::config::unknown_section),
        help("{}", choices(suggestion.as_deref(), &SECTIONS.join(", ")))
    )]
    UnknownSection {
        section: String,
        suggestion: Option<String>,
        #[label("not a vigil section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("unknown key `{key}` in [{section}]")]
    #[diagnostic(
        code(vigil::config::unknown_key),
        help("{}", choices(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        section: String,
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(
        code(vigil::config::invalid_type),
        help("expected {expected}; check both vigil.toml and {env_var}")
    )]
    InvalidType {
        /// Dotted path, e.g. `pipeline.trace_capacity`.
        key: String,
        found: String,
        expected: String,
        env_var: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Semantic check failure from [`crate::validation`].
    #[error("invalid `{key}`: {message}")]
    #[diagnostic(code(vigil::config::validation))]
    Validation { key: String, message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(vigil::config::other))]
    Other(String),
}

impl ConfigError {
    pub fn validation(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for vigil_core::VigilError {
    fn from(err: ConfigError) -> Self {
        vigil_core::VigilError::Config(err.to_string())
    }
}

fn choices(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid: {valid}"),
        None => format!("valid: {valid}"),
    }
}

/// Convert every error inside a `figment::Error` into a [`ConfigError`].
///
/// `toml_sources` pairs a file path (or [`INLINE_SOURCE`]) with its content.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let source = source_for(&error, toml_sources);
            match (&error.kind, error.path.as_slice()) {
                (Kind::UnknownField(field, _), []) => {
                    let (span, src) = locate(source, |c| header_offset(c, field), field.len() + 2);
                    ConfigError::UnknownSection {
                        section: field.clone(),
                        suggestion: suggest_key(field, &SECTIONS),
                        span,
                        src,
                    }
                }
                (Kind::UnknownField(field, expected), [section, ..]) => {
                    let (span, src) =
                        locate(source, |c| find_key_offset(c, section, field), field.len());
                    ConfigError::UnknownKey {
                        section: section.clone(),
                        key: field.clone(),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                (Kind::InvalidType(actual, expected), path) if !path.is_empty() => {
                    let key = path.join(".");
                    let (span, src) = match path {
                        [section, field] => {
                            locate(source, |c| find_key_offset(c, section, field), field.len())
                        }
                        [section] => locate(source, |c| header_offset(c, section), section.len() + 2),
                        _ => (None, None),
                    };
                    ConfigError::InvalidType {
                        env_var: env_var_for(&key),
                        key,
                        found: actual.to_string(),
                        expected: expected.clone(),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// The TOML text an error came from, if it came from TOML at all.
fn source_for<'a>(
    error: &FigmentError,
    sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let metadata = error.metadata.as_ref()?;
    match &metadata.source {
        Some(figment::Source::File(path)) => {
            let path = path.display().to_string();
            sources.iter().find(|(p, _)| *p == path)
        }
        _ if metadata.name.contains("environment") => None,
        _ => sources.iter().find(|(p, _)| p == INLINE_SOURCE),
    }
}

fn locate(
    source: Option<&(String, String)>,
    find: impl FnOnce(&str) -> Option<usize>,
    len: usize,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some((name, content)) = source else {
        return (None, None);
    };
    match find(content) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), len)),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of the `[section]` header.
fn header_offset(content: &str, section: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let name = line
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim);
        if name == Some(section) {
            return Some(offset + (line.len() - line.trim_start().len()));
        }
        offset += line.len();
    }
    None
}

/// Byte offset of `key` inside the `[section]` table of `content`.
pub fn find_key_offset(content: &str, section: &str, key: &str) -> Option<usize> {
    let header = header_offset(content, section)?;
    let body = content[header..]
        .find('\n')
        .map_or(content.len(), |i| header + i + 1);

    let mut offset = body;
    for line in content[body..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(key)
            && after.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest candidate above the similarity threshold, if any.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
