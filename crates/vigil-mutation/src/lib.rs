// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential mutation engine.
//!
//! [`ops`] holds the pure buffer transforms. [`session`] wraps them in a
//! preview-capable editing transaction seeded with a [`SuggestionSet`].
//!
//! Offsets are counted in characters, not bytes, so multi-byte input can
//! never split a code point.
//!
//! [`SuggestionSet`]: vigil_core::SuggestionSet

pub mod ops;
pub mod session;

pub use ops::{insert_at, is_applicable, substitute_all, Insertion, Operation};
pub use session::{Affordance, Cursor, MutationSession};
