// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence port for the credential vault.

use async_trait::async_trait;

use crate::error::VigilError;
use crate::traits::adapter::PluginAdapter;
use crate::types::VaultSnapshot;

/// Key-value style persistence for vault snapshots.
///
/// The vault itself never touches storage; it hands whole snapshots to this
/// port, which may be backed by SQLite, memory, or anything else.
#[async_trait]
pub trait VaultStore: PluginAdapter {
    /// Loads the last saved snapshot, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<VaultSnapshot>, VigilError>;

    /// Replaces the stored snapshot.
    async fn save(&self, snapshot: &VaultSnapshot) -> Result<(), VigilError>;
}
