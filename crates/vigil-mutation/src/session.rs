// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive editing transaction over a credential buffer.
//!
//! A session owns the committed buffer, the cursor bookkeeping and at most
//! one preview. Previews are computed with the same transforms that
//! [`MutationSession::apply`] uses and never touch the committed buffer.

use tracing::debug;
use vigil_core::{SuggestionSet, VigilError};

use crate::ops::{self, Operation};

/// A character range in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub start: usize,
    pub end: usize,
}

impl Cursor {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// A suggestion control, addressed by index into the session's suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Symbol(usize),
    Suffix(usize),
    Substitution(usize),
}

/// Manual strengthening session.
#[derive(Debug, Clone)]
pub struct MutationSession {
    buffer: String,
    selection: Option<Cursor>,
    last_known: Option<usize>,
    preview: Option<String>,
    suggestions: SuggestionSet,
}

impl MutationSession {
    pub fn new(buffer: impl Into<String>, suggestions: SuggestionSet) -> Self {
        Self {
            buffer: buffer.into(),
            selection: None,
            last_known: None,
            preview: None,
            suggestions,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    /// The preview if one is active, otherwise the committed buffer.
    pub fn display(&self) -> &str {
        self.preview.as_deref().unwrap_or(&self.buffer)
    }

    /// Record a live selection.
    pub fn select(&mut self, start: usize, end: usize) -> Result<(), VigilError> {
        let len = self.len();
        if start > end || end > len {
            return Err(VigilError::InvalidRange { start, end, len });
        }
        self.selection = Some(Cursor { start, end });
        self.last_known = Some(start);
        Ok(())
    }

    /// Drop the live selection, keeping the last known caret.
    pub fn blur(&mut self) {
        self.selection = None;
    }

    /// Replace the buffer with freely typed text and put the caret at its end.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        let end = self.len();
        self.selection = Some(Cursor::caret(end));
        self.last_known = Some(end);
        self.preview = None;
    }

    /// The range an insertion would replace right now.
    ///
    /// Falls back from the live selection to the last known caret, then to
    /// the end of the buffer.
    pub fn cursor(&self) -> Cursor {
        let len = self.len();
        if let Some(sel) = self.selection {
            return Cursor {
                start: sel.start.min(len),
                end: sel.end.min(len),
            };
        }
        Cursor::caret(self.last_known.map_or(len, |at| at.min(len)))
    }

    /// Resolve an affordance into the operation it stands for.
    pub fn op_for(&self, affordance: Affordance) -> Option<Operation> {
        match affordance {
            Affordance::Symbol(i) => self.suggestions.symbols.get(i).cloned().map(Operation::Insert),
            Affordance::Suffix(i) => self.suggestions.suffixes.get(i).cloned().map(Operation::Insert),
            Affordance::Substitution(i) => self
                .suggestions
                .substitutions
                .get(i)
                .cloned()
                .map(Operation::Substitute),
        }
    }

    /// Whether invoking `op` would change anything.
    pub fn is_actionable(&self, op: &Operation) -> bool {
        match op {
            Operation::Insert(_) => true,
            Operation::Substitute(sub) => ops::is_applicable(&self.buffer, &sub.from),
        }
    }

    /// Compute and hold the buffer `op` would produce.
    ///
    /// Returns `None`, leaving no preview, for a non-actionable substitution.
    pub fn begin_preview(&mut self, op: &Operation) -> Result<Option<&str>, VigilError> {
        self.preview = None;
        if !self.is_actionable(op) {
            return Ok(None);
        }
        let (next, _) = self.transform(op)?;
        self.preview = Some(next);
        Ok(self.preview.as_deref())
    }

    /// Discard the preview, if any.
    pub fn end_preview(&mut self) {
        self.preview = None;
    }

    /// Apply `op` to the committed buffer. Returns whether it was applied.
    ///
    /// Any preview is cleared either way.
    pub fn apply(&mut self, op: &Operation) -> Result<bool, VigilError> {
        self.preview = None;
        if !self.is_actionable(op) {
            debug!("substitution not applicable, ignoring");
            return Ok(false);
        }
        let (next, caret) = self.transform(op)?;
        self.buffer = next;
        if let Some(at) = caret {
            self.selection = Some(Cursor::caret(at));
            self.last_known = Some(at);
        }
        Ok(true)
    }

    /// End the session, yielding the committed buffer.
    pub fn into_buffer(self) -> String {
        self.buffer
    }

    fn transform(&self, op: &Operation) -> Result<(String, Option<usize>), VigilError> {
        match op {
            Operation::Insert(text) => {
                let Cursor { start, end } = self.cursor();
                let out = ops::insert_at(&self.buffer, start, end, text)?;
                Ok((out.buffer, Some(out.cursor)))
            }
            Operation::Substitute(sub) => {
                Ok((ops::substitute_all(&self.buffer, &sub.from, &sub.to), None))
            }
        }
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use vigil_core::Substitution;

    use super::*;

    fn session(text: &str) -> MutationSession {
        MutationSession::new(
            text,
            SuggestionSet {
                symbols: vec!["!".into(), "#".into()],
                suffixes: vec!["2024".into()],
                substitutions: vec![Substitution::new("a", "@"), Substitution::new("z", "2")],
            },
        )
    }

    #[test]
    fn cursor_defaults_to_end() {
        let s = session("pass");
        assert_eq!(s.cursor(), Cursor::caret(4));
    }

    #[test]
    fn blur_falls_back_to_last_known_caret() {
        let mut s = session("password");
        s.select(2, 5).unwrap();
        s.blur();
        assert_eq!(s.cursor(), Cursor::caret(2));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut s = session("abc");
        assert!(s.select(1, 9).is_err());
        assert_eq!(s.cursor(), Cursor::caret(3));
    }

    #[test]
    fn preview_leaves_buffer_untouched() {
        let mut s = session("pass");
        let op = s.op_for(Affordance::Suffix(0)).unwrap();
        assert_eq!(s.begin_preview(&op).unwrap(), Some("pass2024"));
        assert_eq!(s.buffer(), "pass");
        assert_eq!(s.display(), "pass2024");
        s.end_preview();
        assert_eq!(s.preview(), None);
        assert_eq!(s.display(), "pass");
    }

    #[test]
    fn apply_clears_preview_and_moves_caret() {
        let mut s = session("pass");
        s.select(0, 0).unwrap();
        let op = s.op_for(Affordance::Symbol(1)).unwrap();
        s.begin_preview(&op).unwrap();
        assert!(s.apply(&op).unwrap());
        assert_eq!(s.buffer(), "#pass");
        assert_eq!(s.preview(), None);
        assert_eq!(s.cursor(), Cursor::caret(1));
    }

    #[test]
    fn inapplicable_substitution_is_inert() {
        let mut s = session("pass");
        let op = s.op_for(Affordance::Substitution(1)).unwrap();
        assert!(!s.is_actionable(&op));
        assert_eq!(s.begin_preview(&op).unwrap(), None);
        assert!(!s.apply(&op).unwrap());
        assert_eq!(s.buffer(), "pass");
    }

    #[test]
    fn substitution_applies_globally() {
        let mut s = session("BANANA");
        let op = s.op_for(Affordance::Substitution(0)).unwrap();
        assert!(s.apply(&op).unwrap());
        assert_eq!(s.buffer(), "B@N@N@");
    }

    #[test]
    fn caret_is_clamped_after_shrinking_substitution() {
        let mut s = MutationSession::new(
            "aaaa",
            SuggestionSet {
                substitutions: vec![Substitution::new("aa", "b")],
                ..Default::default()
            },
        );
        s.select(4, 4).unwrap();
        let op = s.op_for(Affordance::Substitution(0)).unwrap();
        s.apply(&op).unwrap();
        assert_eq!(s.buffer(), "bb");
        assert_eq!(s.cursor(), Cursor::caret(2));
    }

    #[test]
    fn edit_replaces_buffer_and_drops_preview() {
        let mut s = session("pass");
        let op = s.op_for(Affordance::Symbol(0)).unwrap();
        s.begin_preview(&op).unwrap();
        s.edit("hunter2");
        assert_eq!(s.buffer(), "hunter2");
        assert_eq!(s.preview(), None);
        assert_eq!(s.cursor(), Cursor::caret(7));
    }

    #[test]
    fn unknown_affordance_resolves_to_none() {
        let s = session("pass");
        assert_eq!(s.op_for(Affordance::Symbol(9)), None);
    }
}
