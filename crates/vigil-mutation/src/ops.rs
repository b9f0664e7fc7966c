// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure transforms over a credential buffer.

use regex::{NoExpand, Regex, RegexBuilder};
use vigil_core::{Substitution, VigilError};

/// Result of [`insert_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub buffer: String,
    /// Character offset just past the inserted text.
    pub cursor: usize,
}

/// A transform that can be previewed or applied to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Replace the cursor selection with text.
    Insert(String),
    /// Replace every case-insensitive occurrence of a literal.
    Substitute(Substitution),
}

/// Splice `text` over the character range `start..end` of `buffer`.
///
/// Requires `start <= end <= buffer.chars().count()`.
pub fn insert_at(buffer: &str, start: usize, end: usize, text: &str) -> Result<Insertion, VigilError> {
    let len = buffer.chars().count();
    if start > end || end > len {
        return Err(VigilError::InvalidRange { start, end, len });
    }

    let head = byte_offset(buffer, start);
    let tail = byte_offset(buffer, end);

    let mut out = String::with_capacity(buffer.len() - (tail - head) + text.len());
    out.push_str(&buffer[..head]);
    out.push_str(text);
    out.push_str(&buffer[tail..]);

    Ok(Insertion {
        buffer: out,
        cursor: start + text.chars().count(),
    })
}

/// Replace every case-insensitive occurrence of the literal `from` with `to`.
///
/// `from` is matched as text, never as a pattern, and `to` is inserted
/// verbatim. An empty `from` matches nothing.
pub fn substitute_all(buffer: &str, from: &str, to: &str) -> String {
    match literal_matcher(from) {
        Some(re) => re.replace_all(buffer, NoExpand(to)).into_owned(),
        None => buffer.to_string(),
    }
}

/// Whether `from` occurs in `buffer`, ignoring case.
pub fn is_applicable(buffer: &str, from: &str) -> bool {
    literal_matcher(from).is_some_and(|re| re.is_match(buffer))
}

fn literal_matcher(from: &str) -> Option<Regex> {
    if from.is_empty() {
        return None;
    }
    // An escaped literal always compiles; a failure here would only mean the
    // size limit was hit, and then nothing can match anyway.
    RegexBuilder::new(&regex::escape(from))
        .case_insensitive(true)
        .build()
        .ok()
}

fn byte_offset(buffer: &str, chars: usize) -> usize {
    buffer
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(buffer.len())
}
