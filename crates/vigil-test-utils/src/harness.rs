// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end workbench tests.
//!
//! `TestHarness` wires a [`Workbench`] to a [`MockAdvisor`] and either an
//! in-memory store or a SQLite store in a temp directory.

use std::sync::Arc;

use vigil_core::{VaultSnapshot, VaultStore, VigilError};
use vigil_engine::{EngineSettings, Workbench};
use vigil_vault::SqliteVaultStore;

use crate::memory_store::MemoryVaultStore;
use crate::mock_advisor::MockAdvisor;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    advisor: MockAdvisor,
    settings: EngineSettings,
    snapshot: Option<VaultSnapshot>,
    sqlite: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            advisor: MockAdvisor::new(),
            settings: EngineSettings::default(),
            snapshot: None,
            sqlite: false,
        }
    }

    /// Use a pre-configured advisor.
    pub fn with_advisor(mut self, advisor: MockAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Append progress steps without sleeping.
    pub fn without_delays(mut self) -> Self {
        self.settings.pipeline.simulate_delays = false;
        self
    }

    /// Seed the in-memory store. Ignored with [`with_sqlite`](Self::with_sqlite).
    pub fn with_snapshot(mut self, snapshot: VaultSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Persist to a SQLite file in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, VigilError> {
        let advisor = Arc::new(self.advisor);
        let mut memory = None;
        let mut temp_dir = None;
        let store: Arc<dyn VaultStore> = if self.sqlite {
            let dir =
                tempfile::TempDir::new().map_err(|e| VigilError::Storage { source: e.into() })?;
            let store = SqliteVaultStore::open(dir.path().join("vault.db")).await?;
            temp_dir = Some(dir);
            Arc::new(store)
        } else {
            let store = Arc::new(match self.snapshot {
                Some(snapshot) => MemoryVaultStore::with_snapshot(snapshot),
                None => MemoryVaultStore::new(),
            });
            memory = Some(store.clone());
            store
        };

        let workbench = Workbench::start(advisor.clone(), store.clone(), self.settings).await?;
        Ok(TestHarness {
            workbench,
            advisor,
            store,
            memory,
            settings: self.settings,
            _temp_dir: temp_dir,
        })
    }
}

/// A workbench with scripted collaborators.
pub struct TestHarness {
    pub workbench: Workbench,
    pub advisor: Arc<MockAdvisor>,
    pub store: Arc<dyn VaultStore>,
    memory: Option<Arc<MemoryVaultStore>>,
    settings: EngineSettings,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The in-memory store, when the harness was not built with SQLite.
    pub fn memory_store(&self) -> Option<&MemoryVaultStore> {
        self.memory.as_deref()
    }

    /// Start a second workbench over the same store, as a restart would.
    pub async fn reopen(&self) -> Result<Workbench, VigilError> {
        Workbench::start(self.advisor.clone(), self.store.clone(), self.settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_engine::AnalysisStatus;

    #[tokio::test]
    async fn harness_starts_idle() {
        let harness = TestHarness::builder().without_delays().build().await.unwrap();
        let run = harness.workbench.snapshot().await;
        assert_eq!(run.status, AnalysisStatus::Idle);
        assert_eq!(run.trace.len(), 1);
        assert!(harness.memory_store().is_some());
    }

    #[tokio::test]
    async fn sqlite_harness_reopens() {
        let harness = TestHarness::builder()
            .without_delays()
            .with_sqlite()
            .build()
            .await
            .unwrap();
        harness.workbench.analyze("hunter2").await.unwrap();
        harness.workbench.save().await.unwrap();

        let reopened = harness.reopen().await.unwrap();
        assert_eq!(reopened.vault().await.active_len(), 1);
        assert!(harness.memory_store().is_none());
    }
}
