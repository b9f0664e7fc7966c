// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite vault store round trips against a temporary database.

use chrono::{NaiveDate, TimeZone, Utc};
use vigil_core::{CaptureKind, HealthStatus, PluginAdapter, VaultStore};
use vigil_vault::{SaveOutcome, SqliteVaultStore, VaultManager, VaultPolicy};

fn populated() -> VaultManager {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 8, 30, 0).unwrap();
    let mut vault = VaultManager::default();
    let mut ids = Vec::new();
    for (secret, kind) in [
        ("first-secret", CaptureKind::Text),
        ("VOICE-AUTH-1F-12Smp-HZ40", CaptureKind::Voice),
        ("RETINA-ID:abc-XYZ", CaptureKind::Retina),
    ] {
        match vault.save_at(secret, Some(61.5), kind, now) {
            SaveOutcome::Saved(id) => ids.push(id),
            other => panic!("{other:?}"),
        }
    }
    vault.delete(&ids[0]);
    vault.update_description(&ids[1], Some("work laptop".into()));
    vault.update_expiry(&ids[2], NaiveDate::from_ymd_opt(2026, 5, 3));
    vault.reveal_at(&ids[1], now);
    vault
}

#[tokio::test]
async fn empty_store_loads_none() {
    let store = SqliteVaultStore::open_in_memory().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
    assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
}

#[tokio::test]
async fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("vault.db");
    let snapshot = populated().snapshot();

    {
        let store = SqliteVaultStore::open(&path).await.unwrap();
        store.save(&snapshot).await.unwrap();
    }

    let store = SqliteVaultStore::open(&path).await.unwrap();
    let loaded = store.load().await.unwrap().expect("snapshot present");
    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.trashed.len(), 1);
    assert_eq!(loaded.active[0].capture_kind, CaptureKind::Retina);
}

#[tokio::test]
async fn save_replaces_previous_snapshot() {
    let store = SqliteVaultStore::open_in_memory().await.unwrap();
    let mut vault = populated();
    store.save(&vault.snapshot()).await.unwrap();

    let purged = vault.trashed()[0].id.clone();
    assert!(vault.purge(&purged));
    store.save(&vault.snapshot()).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert!(loaded.trashed.is_empty());
    assert_eq!(loaded.active.len(), 2);

    let rebuilt = VaultManager::from_snapshot(loaded, VaultPolicy::default()).unwrap();
    assert!(rebuilt.get(&purged).is_none());
}
