// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory vault persistence port.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use vigil_core::{AdapterType, HealthStatus, PluginAdapter, VaultSnapshot, VaultStore, VigilError};

/// Keeps the last saved snapshot in memory and counts saves.
#[derive(Debug, Default)]
pub struct MemoryVaultStore {
    snapshot: Mutex<Option<VaultSnapshot>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `snapshot`.
    pub fn with_snapshot(snapshot: VaultSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail with a storage error.
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn current(&self) -> Option<VaultSnapshot> {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MemoryVaultStore {
    fn name(&self) -> &str {
        "memory-vault"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::VaultStore
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("saves are failing".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        Ok(())
    }
}

#[async_trait]
impl VaultStore for MemoryVaultStore {
    async fn load(&self) -> Result<Option<VaultSnapshot>, VigilError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &VaultSnapshot) -> Result<(), VigilError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VigilError::Storage {
                source: "memory store configured to fail".into(),
            });
        }
        *self.snapshot.lock().await = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryVaultStore::new();
        assert!(store.load().await.unwrap().is_none());
        store.save(&VaultSnapshot::default()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(VaultSnapshot::default()));
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn failing_store_reports_unhealthy() {
        let store = MemoryVaultStore::new();
        store.fail_saves(true);
        assert!(store.save(&VaultSnapshot::default()).await.is_err());
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
        assert_eq!(store.save_count(), 0);
    }
}
