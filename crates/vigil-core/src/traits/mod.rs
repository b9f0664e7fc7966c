// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the engine's external boundaries.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod advisor;
pub mod store;

pub use adapter::PluginAdapter;
pub use advisor::AdvisorAdapter;
pub use store::VaultStore;
