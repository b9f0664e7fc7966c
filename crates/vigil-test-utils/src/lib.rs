// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vigil integration tests.
//!
//! Provides scripted collaborators and a harness so pipeline, boost and
//! vault behavior can be tested without network access.
//!
//! # Components
//!
//! - [`MockAdvisor`] - Advisor with per-operation FIFO reply scripts
//! - [`MemoryVaultStore`] - In-memory vault persistence port
//! - [`TestHarness`] - A [`Workbench`](vigil_engine::Workbench) wired to both

pub mod harness;
pub mod memory_store;
pub mod mock_advisor;

pub use harness::TestHarness;
pub use memory_store::MemoryVaultStore;
pub use mock_advisor::{MockAdvisor, Reply};
