// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil vault` subcommands. These work on the SQLite store directly and
//! need no advisor.

use chrono::Utc;
use colored::Colorize;
use vigil_config::VigilConfig;
use vigil_core::{CaptureKind, VaultStore, VigilError};
use vigil_engine::EngineSettings;
use vigil_vault::{Collection, SqliteVaultStore, VaultManager};

use crate::render;

async fn open_vault(config: &VigilConfig) -> Result<(SqliteVaultStore, VaultManager), VigilError> {
    let store = SqliteVaultStore::open(&config.vault.database_path).await?;
    let policy = EngineSettings::from(config).vault;
    let vault = match store.load().await? {
        Some(snapshot) => VaultManager::from_snapshot(snapshot, policy)?,
        None => VaultManager::new(policy),
    };
    Ok((store, vault))
}

pub async fn run_list(
    config: &VigilConfig,
    trash: bool,
    kind: Option<CaptureKind>,
) -> Result<(), VigilError> {
    let (_, vault) = open_vault(config).await?;
    let today = Utc::now().date_naive();

    let entries: Vec<_> = if trash {
        vault
            .trashed()
            .iter()
            .filter(|e| kind.is_none_or(|k| e.capture_kind == k))
            .collect()
    } else {
        vault.list_active(kind)
    };

    if entries.is_empty() {
        println!("{}", "no entries".dimmed());
        return Ok(());
    }
    for row in render::entry_table(entries, |e| vault.classify(e, today)) {
        println!("{row}");
    }
    if !trash {
        println!();
        println!("{}", render::expiry_summary(&vault.expiry_report(today), today));
    }
    Ok(())
}

pub async fn run_purge(config: &VigilConfig, prefix: &str) -> Result<(), VigilError> {
    let (store, mut vault) = open_vault(config).await?;
    let id = vault
        .resolve(prefix)
        .ok_or_else(|| VigilError::Vault(format!("no unique entry matches `{prefix}`")))?;

    if let Some((_, Collection::Active)) = vault.get(&id) {
        return Err(VigilError::Vault(format!(
            "entry {} is active; delete it before purging",
            id.short()
        )));
    }
    vault.purge(&id);
    store.save(&vault.snapshot()).await?;
    println!("{}", "Credential permanently shredded from system.".red());
    Ok(())
}
