// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential vault for the Vigil engine.
//!
//! [`VaultManager`] owns the two disjoint collections (active and trashed)
//! and moves entries between them without ever copying or re-identifying
//! them. [`expiry`] classifies expiry dates for display, and
//! [`SqliteVaultStore`] persists snapshots through the [`VaultStore`] port.
//!
//! [`VaultStore`]: vigil_core::VaultStore

pub mod expiry;
pub mod manager;
pub mod mask;
pub mod store;

pub use expiry::{classify_expiry, ExpiryReport, ExpiryStatus};
pub use manager::{Collection, SaveOutcome, VaultManager, VaultPolicy};
pub use mask::mask_secret;
pub use store::SqliteVaultStore;
