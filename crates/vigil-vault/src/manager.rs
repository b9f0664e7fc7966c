// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle: save, soft delete, restore, purge and metadata edits.
//!
//! Entries live in exactly one of two newest-first collections. Moves
//! transfer the entry value itself, so identity and every field survive a
//! round trip through the recycle bin.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{debug, info};
use vigil_core::{CaptureKind, CredentialEntry, EntryId, VaultSnapshot, VigilError};

use crate::expiry::{classify_expiry, ExpiryReport, ExpiryStatus};

/// Which collection currently holds an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Active,
    Trashed,
}

/// Expiry defaults applied by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultPolicy {
    pub default_expiry_days: u64,
    pub warning_days: i64,
}

impl Default for VaultPolicy {
    fn default() -> Self {
        Self {
            default_expiry_days: 90,
            warning_days: 7,
        }
    }
}

/// Outcome of [`VaultManager::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(EntryId),
    /// An active entry already holds the same secret; nothing was stored.
    Duplicate { existing: EntryId },
}

#[derive(Debug, Clone, Default)]
pub struct VaultManager {
    active: Vec<CredentialEntry>,
    trashed: Vec<CredentialEntry>,
    policy: VaultPolicy,
}

impl VaultManager {
    pub fn new(policy: VaultPolicy) -> Self {
        Self {
            active: Vec::new(),
            trashed: Vec::new(),
            policy,
        }
    }

    /// Rebuild a manager from a persisted snapshot.
    ///
    /// Fails if any id appears more than once across both collections.
    pub fn from_snapshot(snapshot: VaultSnapshot, policy: VaultPolicy) -> Result<Self, VigilError> {
        let mut seen = HashSet::new();
        for entry in snapshot.active.iter().chain(snapshot.trashed.iter()) {
            if !seen.insert(entry.id.clone()) {
                return Err(VigilError::Vault(format!(
                    "snapshot contains duplicate entry id {}",
                    entry.id
                )));
            }
        }
        Ok(Self {
            active: snapshot.active,
            trashed: snapshot.trashed,
            policy,
        })
    }

    pub fn snapshot(&self) -> VaultSnapshot {
        VaultSnapshot {
            active: self.active.clone(),
            trashed: self.trashed.clone(),
        }
    }

    pub fn policy(&self) -> VaultPolicy {
        self.policy
    }

    /// Store a new secret at the head of the active collection.
    ///
    /// Deduplicates against active entries only.
    pub fn save(&mut self, secret: &str, score: Option<f64>, kind: CaptureKind) -> SaveOutcome {
        self.save_at(secret, score, kind, Utc::now())
    }

    pub fn save_at(
        &mut self,
        secret: &str,
        score: Option<f64>,
        kind: CaptureKind,
        now: DateTime<Utc>,
    ) -> SaveOutcome {
        if let Some(existing) = self.active.iter().find(|e| e.secret_value == secret) {
            debug!(entry_id = %existing.id, "duplicate secret rejected");
            return SaveOutcome::Duplicate {
                existing: existing.id.clone(),
            };
        }

        let entry = CredentialEntry {
            id: EntryId::generate(),
            secret_value: secret.to_string(),
            created_at: now,
            last_accessed_at: None,
            score,
            description: None,
            capture_kind: kind,
            expires_at: now
                .date_naive()
                .checked_add_days(Days::new(self.policy.default_expiry_days)),
        };
        let id = entry.id.clone();
        info!(entry_id = %id, kind = %kind, "credential archived");
        self.active.insert(0, entry);
        SaveOutcome::Saved(id)
    }

    /// Move an active entry to the head of the trash.
    pub fn delete(&mut self, id: &EntryId) -> bool {
        match take(&mut self.active, id) {
            Some(entry) => {
                debug!(entry_id = %id, "moved to trash");
                self.trashed.insert(0, entry);
                true
            }
            None => false,
        }
    }

    /// Move a trashed entry back to the head of the active collection.
    ///
    /// Does not re-check secret uniqueness, so restoring can leave two
    /// active entries with the same secret.
    pub fn restore(&mut self, id: &EntryId) -> bool {
        match take(&mut self.trashed, id) {
            Some(entry) => {
                debug!(entry_id = %id, "restored from trash");
                self.active.insert(0, entry);
                true
            }
            None => false,
        }
    }

    /// Permanently remove a trashed entry. Active entries cannot be purged.
    pub fn purge(&mut self, id: &EntryId) -> bool {
        let purged = take(&mut self.trashed, id).is_some();
        if purged {
            info!(entry_id = %id, "credential purged");
        }
        purged
    }

    pub fn update_description(&mut self, id: &EntryId, description: Option<String>) -> bool {
        self.entry_mut(id)
            .map(|entry| entry.description = description)
            .is_some()
    }

    pub fn update_expiry(&mut self, id: &EntryId, expires_at: Option<NaiveDate>) -> bool {
        self.entry_mut(id)
            .map(|entry| entry.expires_at = expires_at)
            .is_some()
    }

    /// Record an explicit reveal of an active entry and return it.
    pub fn reveal(&mut self, id: &EntryId) -> Option<&CredentialEntry> {
        self.reveal_at(id, Utc::now())
    }

    pub fn reveal_at(&mut self, id: &EntryId, now: DateTime<Utc>) -> Option<&CredentialEntry> {
        let entry = self.active.iter_mut().find(|e| &e.id == id)?;
        entry.last_accessed_at = Some(now);
        Some(entry)
    }

    pub fn active(&self) -> &[CredentialEntry] {
        &self.active
    }

    pub fn trashed(&self) -> &[CredentialEntry] {
        &self.trashed
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Active entries, optionally restricted to one capture kind.
    pub fn list_active(&self, kind: Option<CaptureKind>) -> Vec<&CredentialEntry> {
        self.active
            .iter()
            .filter(|e| kind.is_none_or(|k| e.capture_kind == k))
            .collect()
    }

    /// Look an entry up in either collection.
    pub fn get(&self, id: &EntryId) -> Option<(&CredentialEntry, Collection)> {
        if let Some(entry) = self.active.iter().find(|e| &e.id == id) {
            return Some((entry, Collection::Active));
        }
        self.trashed
            .iter()
            .find(|e| &e.id == id)
            .map(|entry| (entry, Collection::Trashed))
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve(&self, prefix: &str) -> Option<EntryId> {
        let mut matches = self
            .active
            .iter()
            .chain(self.trashed.iter())
            .filter(|e| e.id.as_str().starts_with(prefix));
        let first = matches.next()?;
        if first.id.as_str() != prefix && matches.next().is_some() {
            return None;
        }
        Some(first.id.clone())
    }

    pub fn classify(&self, entry: &CredentialEntry, today: NaiveDate) -> ExpiryStatus {
        classify_expiry(entry.expires_at, today, self.policy.warning_days)
    }

    /// Expiry counts over the active collection.
    pub fn expiry_report(&self, today: NaiveDate) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        for entry in &self.active {
            report.record(self.classify(entry, today));
        }
        report
    }

    fn entry_mut(&mut self, id: &EntryId) -> Option<&mut CredentialEntry> {
        self.active
            .iter_mut()
            .chain(self.trashed.iter_mut())
            .find(|e| &e.id == id)
    }
}

fn take(collection: &mut Vec<CredentialEntry>, id: &EntryId) -> Option<CredentialEntry> {
    let index = collection.iter().position(|e| &e.id == id)?;
    Some(collection.remove(index))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    fn saved(vault: &mut VaultManager, secret: &str) -> EntryId {
        match vault.save_at(secret, Some(50.0), CaptureKind::Text, now()) {
            SaveOutcome::Saved(id) => id,
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_secret_is_rejected() {
        let mut vault = VaultManager::default();
        let first = match vault.save_at("abc123", Some(42.0), CaptureKind::Text, now()) {
            SaveOutcome::Saved(id) => id,
            other => panic!("{other:?}"),
        };
        let second = vault.save_at("abc123", Some(99.0), CaptureKind::Text, now());

        assert_eq!(second, SaveOutcome::Duplicate { existing: first });
        assert_eq!(vault.active_len(), 1);
        assert_eq!(vault.active()[0].score, Some(42.0));
    }

    #[test]
    fn save_sets_default_expiry_and_prepends() {
        let mut vault = VaultManager::default();
        saved(&mut vault, "one");
        let id = saved(&mut vault, "two");

        let head = &vault.active()[0];
        assert_eq!(head.id, id);
        assert_eq!(head.created_at, now());
        assert_eq!(head.expires_at, NaiveDate::from_ymd_opt(2026, 4, 10));
        assert!(head.last_accessed_at.is_none());
    }

    #[test]
    fn trashed_secret_can_be_saved_again() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "abc123");
        assert!(vault.delete(&id));
        assert!(matches!(
            vault.save_at("abc123", None, CaptureKind::Text, now()),
            SaveOutcome::Saved(_)
        ));
    }

    #[test]
    fn delete_restore_preserves_entry() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "secret-1");
        vault.update_description(&id, Some("bank".into()));
        let before = vault.get(&id).unwrap().0.clone();

        assert!(vault.delete(&id));
        assert_eq!(vault.get(&id).unwrap().1, Collection::Trashed);
        assert!(vault.restore(&id));

        let (after, collection) = vault.get(&id).unwrap();
        assert_eq!(collection, Collection::Active);
        assert_eq!(after, &before);
    }

    #[test]
    fn moves_go_to_head() {
        let mut vault = VaultManager::default();
        let a = saved(&mut vault, "a");
        let b = saved(&mut vault, "b");
        vault.delete(&a);
        vault.delete(&b);
        assert_eq!(vault.trashed()[0].id, b);
        vault.restore(&a);
        assert_eq!(vault.active()[0].id, a);
    }

    #[test]
    fn purge_only_from_trash() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "keep");
        assert!(!vault.purge(&id));
        assert_eq!(vault.active_len(), 1);

        vault.delete(&id);
        assert!(vault.purge(&id));
        assert!(vault.get(&id).is_none());
        assert!(!vault.purge(&id));
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut vault = VaultManager::default();
        let ghost = EntryId::from("ghost");
        assert!(!vault.delete(&ghost));
        assert!(!vault.restore(&ghost));
        assert!(!vault.update_expiry(&ghost, None));
        assert!(vault.reveal(&ghost).is_none());
    }

    #[test]
    fn metadata_edits_reach_trashed_entries() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "x");
        vault.delete(&id);
        assert!(vault.update_expiry(&id, None));
        assert!(vault.update_description(&id, Some("old".into())));
        let (entry, _) = vault.get(&id).unwrap();
        assert_eq!(entry.expires_at, None);
        assert_eq!(entry.description.as_deref(), Some("old"));
    }

    #[test]
    fn reveal_touches_active_only() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "x");
        let later = now() + chrono::Duration::hours(1);
        assert_eq!(vault.reveal_at(&id, later).unwrap().last_accessed_at, Some(later));

        vault.delete(&id);
        assert!(vault.reveal_at(&id, later).is_none());
    }

    #[test]
    fn restore_does_not_recheck_uniqueness() {
        let mut vault = VaultManager::default();
        let old = saved(&mut vault, "same");
        vault.delete(&old);
        saved(&mut vault, "same");
        vault.restore(&old);
        assert_eq!(
            vault.active().iter().filter(|e| e.secret_value == "same").count(),
            2
        );
    }

    #[test]
    fn list_filters_by_kind() {
        let mut vault = VaultManager::default();
        vault.save_at("t", None, CaptureKind::Text, now());
        vault.save_at("v", None, CaptureKind::Voice, now());
        assert_eq!(vault.list_active(None).len(), 2);
        let voice = vault.list_active(Some(CaptureKind::Voice));
        assert_eq!(voice.len(), 1);
        assert_eq!(voice[0].secret_value, "v");
    }

    #[test]
    fn snapshot_with_duplicate_ids_is_rejected() {
        let mut vault = VaultManager::default();
        saved(&mut vault, "x");
        let mut snapshot = vault.snapshot();
        snapshot.trashed.push(snapshot.active[0].clone());
        assert!(VaultManager::from_snapshot(snapshot, VaultPolicy::default()).is_err());
    }

    #[test]
    fn resolves_unique_prefix() {
        let mut vault = VaultManager::default();
        let id = saved(&mut vault, "x");
        assert_eq!(vault.resolve(id.as_str()), Some(id.clone()));
        assert_eq!(vault.resolve(&id.as_str()[..8]), Some(id));
        assert_eq!(vault.resolve("zzzz-not-hex"), None);
    }

    #[test]
    fn expiry_report_counts_active() {
        let mut vault = VaultManager::default();
        let soon = saved(&mut vault, "soon");
        let gone = saved(&mut vault, "gone");
        saved(&mut vault, "fine");
        let today = now().date_naive();
        vault.update_expiry(&soon, today.checked_add_days(Days::new(2)));
        vault.update_expiry(&gone, today.checked_sub_days(Days::new(2)));

        let report = vault.expiry_report(today);
        assert_eq!(report.expiring_soon, 1);
        assert_eq!(report.expired, 1);
        assert_eq!(report.valid, 1);
    }
}
