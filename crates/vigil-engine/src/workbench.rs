// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The workbench ties the pipeline, the boost coordinator and the vault
//! together behind one handle.
//!
//! Vault mutations are applied to a draft copy of the vault, persisted through
//! the [`VaultStore`] port, and only then swapped in. A failed save leaves the
//! in-memory vault as it was. Each mutation leaves a line in the trace log.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use vigil_config::VigilConfig;
use vigil_core::{
    AdvisorAdapter, CaptureKind, CredentialEntry, EntryId, HealthStatus, VaultStore, VigilError,
};
use vigil_mutation::MutationSession;
use vigil_vault::{SaveOutcome, VaultManager, VaultPolicy};

use crate::boost::{BoostCoordinator, BoostSettings};
use crate::pipeline::{
    AnalysisPipeline, AnalysisRun, AnalysisStatus, PipelineSettings, TraceMode,
};
use crate::trace::{text, Severity};

/// Settings for every part of the workbench.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineSettings {
    pub pipeline: PipelineSettings,
    pub boost: BoostSettings,
    pub vault: VaultPolicy,
}

impl From<&VigilConfig> for EngineSettings {
    fn from(config: &VigilConfig) -> Self {
        Self {
            pipeline: PipelineSettings::from(&config.pipeline),
            boost: BoostSettings::from(&config.boost),
            vault: VaultPolicy {
                default_expiry_days: u64::try_from(config.vault.default_expiry_days)
                    .unwrap_or(1)
                    .max(1),
                warning_days: config.vault.expiry_warning_days,
            },
        }
    }
}

pub struct Workbench {
    pipeline: AnalysisPipeline,
    boost: BoostCoordinator,
    vault: Mutex<VaultManager>,
    store: Arc<dyn VaultStore>,
    capture_kind: Mutex<CaptureKind>,
}

impl Workbench {
    /// Load the vault from `store` and bring the engine up idle.
    pub async fn start(
        advisor: Arc<dyn AdvisorAdapter>,
        store: Arc<dyn VaultStore>,
        settings: EngineSettings,
    ) -> Result<Self, VigilError> {
        let vault = match store.load().await? {
            Some(snapshot) => VaultManager::from_snapshot(snapshot, settings.vault)?,
            None => VaultManager::new(settings.vault),
        };
        info!(
            active = vault.active_len(),
            trashed = vault.trashed().len(),
            advisor = advisor.name(),
            store = store.name(),
            "workbench started"
        );

        let pipeline = AnalysisPipeline::new(advisor, settings.pipeline);
        pipeline.log(text::SYSTEM_READY, Severity::Success).await;

        Ok(Self {
            pipeline,
            boost: BoostCoordinator::new(settings.boost),
            vault: Mutex::new(vault),
            store,
            capture_kind: Mutex::new(CaptureKind::Text),
        })
    }

    /// Analyze typed text on a fresh trace.
    pub async fn analyze(&self, target: &str) -> Result<AnalysisRun, VigilError> {
        *self.capture_kind.lock().await = CaptureKind::Text;
        self.pipeline.run_analysis(target, TraceMode::Fresh).await
    }

    /// Analyze a voice fingerprint built from per-frame peak magnitudes.
    pub async fn capture_voice(&self, peaks: &[u8]) -> Result<AnalysisRun, VigilError> {
        let fingerprint = vigil_fingerprint::voice_fingerprint(peaks, &mut rand::thread_rng());
        self.capture(CaptureKind::Voice, fingerprint, text::VOICE_CAPTURED)
            .await
    }

    /// Analyze a retina fingerprint built from an RGBA frame.
    pub async fn capture_retina(&self, rgba: &[u8]) -> Result<AnalysisRun, VigilError> {
        let fingerprint = vigil_fingerprint::retina_fingerprint(rgba, Utc::now());
        self.capture(CaptureKind::Retina, fingerprint, text::RETINA_CAPTURED)
            .await
    }

    /// Analyze a biometric token.
    ///
    /// With a platform authenticator id the token is derived from it;
    /// otherwise a simulated print is used.
    pub async fn capture_bio(&self, device_id: Option<&str>) -> Result<AnalysisRun, VigilError> {
        let fingerprint = match device_id {
            Some(raw) => vigil_fingerprint::bio_device_fingerprint(raw),
            None => vigil_fingerprint::bio_fingerprint(&mut rand::thread_rng(), Utc::now()),
        };
        self.capture(CaptureKind::Bio, fingerprint, text::BIO_CAPTURED)
            .await
    }

    async fn capture(
        &self,
        kind: CaptureKind,
        fingerprint: String,
        line: &str,
    ) -> Result<AnalysisRun, VigilError> {
        debug!(kind = %kind, "fingerprint captured");
        *self.capture_kind.lock().await = kind;
        self.pipeline.clear_trace().await;
        self.pipeline.log(line, Severity::Success).await;
        self.pipeline
            .run_analysis(&fingerprint, TraceMode::Continue)
            .await
    }

    pub async fn reset(&self) {
        *self.capture_kind.lock().await = CaptureKind::Text;
        self.pipeline.reset().await;
    }

    pub async fn snapshot(&self) -> AnalysisRun {
        self.pipeline.snapshot().await
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }

    // --- Boost ---

    pub async fn boost_auto(&self) -> Result<AnalysisRun, VigilError> {
        self.boost.auto(&self.pipeline).await
    }

    pub async fn boost_manual(&self) -> Result<MutationSession, VigilError> {
        self.boost.manual(&self.pipeline).await
    }

    pub async fn commit(&self, session: MutationSession) -> Result<AnalysisRun, VigilError> {
        self.boost.commit(&self.pipeline, session).await
    }

    pub fn cancel(&self, session: MutationSession) {
        self.boost.cancel(session);
    }

    pub fn boost_busy(&self) -> bool {
        self.boost.is_busy()
    }

    // --- Vault ---

    /// Archive the target of the completed run.
    pub async fn save(&self) -> Result<SaveOutcome, VigilError> {
        let run = self.pipeline.snapshot().await;
        if run.status != AnalysisStatus::Complete {
            return Err(VigilError::Vault(format!(
                "nothing to archive: analysis is {}",
                run.status
            )));
        }
        let kind = *self.capture_kind.lock().await;

        let mut vault = self.vault.lock().await;
        let mut draft = vault.clone();
        let outcome = draft.save(&run.target_text, run.score(), kind);
        match &outcome {
            SaveOutcome::Duplicate { .. } => {
                self.pipeline
                    .log(text::VAULT_DUPLICATE, Severity::Warning)
                    .await;
            }
            SaveOutcome::Saved(_) => {
                self.pipeline
                    .log(text::VAULT_ENCRYPTING, Severity::Info)
                    .await;
                self.persist(&mut vault, draft).await?;
                self.pipeline
                    .log(text::archived(&kind.to_string()), Severity::Success)
                    .await;
            }
        }
        Ok(outcome)
    }

    pub async fn delete(&self, id: &EntryId) -> Result<bool, VigilError> {
        self.mutate(|v| v.delete(id), text::VAULT_TRASHED, Severity::Warning)
            .await
    }

    pub async fn restore(&self, id: &EntryId) -> Result<bool, VigilError> {
        self.mutate(|v| v.restore(id), text::VAULT_RESTORED, Severity::Success)
            .await
    }

    pub async fn purge(&self, id: &EntryId) -> Result<bool, VigilError> {
        self.mutate(|v| v.purge(id), text::VAULT_PURGED, Severity::Error)
            .await
    }

    /// Set or clear an entry's description. Not traced.
    pub async fn describe(
        &self,
        id: &EntryId,
        description: Option<String>,
    ) -> Result<bool, VigilError> {
        let mut vault = self.vault.lock().await;
        let mut draft = vault.clone();
        if !draft.update_description(id, description) {
            return Ok(false);
        }
        self.persist(&mut vault, draft).await?;
        Ok(true)
    }

    pub async fn set_expiry(
        &self,
        id: &EntryId,
        expires_at: Option<NaiveDate>,
    ) -> Result<bool, VigilError> {
        self.mutate(
            |v| v.update_expiry(id, expires_at),
            text::VAULT_EXPIRY,
            Severity::Info,
        )
        .await
    }

    /// Return an active entry's secret and stamp its access time.
    pub async fn reveal(&self, id: &EntryId) -> Result<Option<CredentialEntry>, VigilError> {
        let mut vault = self.vault.lock().await;
        let mut draft = vault.clone();
        let Some(entry) = draft.reveal(id).cloned() else {
            return Ok(None);
        };
        self.persist(&mut vault, draft).await?;
        self.pipeline
            .log(text::copied(entry.id.short()), Severity::Info)
            .await;
        Ok(Some(entry))
    }

    /// Read access to the vault.
    pub async fn vault(&self) -> MutexGuard<'_, VaultManager> {
        self.vault.lock().await
    }

    /// Resolve a full id or unique prefix against both collections.
    pub async fn resolve(&self, prefix: &str) -> Result<EntryId, VigilError> {
        self.vault
            .lock()
            .await
            .resolve(prefix)
            .ok_or_else(|| VigilError::Vault(format!("no unique entry matches `{prefix}`")))
    }

    pub async fn store_health(&self) -> Result<HealthStatus, VigilError> {
        self.store.health_check().await
    }

    async fn mutate<F>(&self, op: F, line: &str, severity: Severity) -> Result<bool, VigilError>
    where
        F: FnOnce(&mut VaultManager) -> bool,
    {
        let mut vault = self.vault.lock().await;
        let mut draft = vault.clone();
        if !op(&mut draft) {
            return Ok(false);
        }
        self.persist(&mut vault, draft).await?;
        self.pipeline.log(line, severity).await;
        Ok(true)
    }

    /// Save `draft` to the store, then make it the live vault.
    async fn persist(
        &self,
        vault: &mut VaultManager,
        draft: VaultManager,
    ) -> Result<(), VigilError> {
        if let Err(e) = self.store.save(&draft.snapshot()).await {
            warn!(error = %e, "vault save failed, change discarded");
            return Err(e);
        }
        *vault = draft;
        Ok(())
    }
}
