// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed [`VaultStore`].
//!
//! Both collections share one table; `collection` and `position` keep the
//! newest-first order. Each save replaces the whole snapshot inside a single
//! transaction. All access goes through tokio-rusqlite's background thread.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;
use tokio_rusqlite::Connection;
use tracing::debug;
use vigil_core::{
    AdapterType, CaptureKind, CredentialEntry, EntryId, HealthStatus, PluginAdapter,
    VaultSnapshot, VaultStore, VigilError,
};

use crate::manager::Collection;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub struct SqliteVaultStore {
    conn: Connection,
}

impl SqliteVaultStore {
    /// Open (creating if needed) the database at `path` and apply migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, VigilError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| VigilError::Storage {
                source: Box::new(e),
            })?;
        }
        let conn = Connection::open(path).await.map_err(|e| VigilError::Storage {
            source: Box::new(e),
        })?;
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self, VigilError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| VigilError::Storage {
                source: Box::new(e),
            })?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, VigilError> {
        conn.call(|conn| -> Result<(), refinery::Error> {
            embedded::migrations::runner().run(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| VigilError::Storage {
            source: format!("vault migration failed: {e}").into(),
        })?;
        debug!("vault store ready");
        Ok(Self { conn })
    }
}

#[async_trait]
impl PluginAdapter for SqliteVaultStore {
    fn name(&self) -> &str {
        "sqlite-vault"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::VaultStore
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        Ok(())
    }
}

#[async_trait]
impl VaultStore for SqliteVaultStore {
    async fn load(&self) -> Result<Option<VaultSnapshot>, VigilError> {
        let rows = self
            .conn
            .call(|conn| -> Result<Vec<StoredRow>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, collection, secret_value, created_at, last_accessed_at, \
                     score, description, capture_kind, expires_at \
                     FROM vault_entries ORDER BY collection, position",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(StoredRow {
                        id: row.get(0)?,
                        collection: row.get(1)?,
                        secret_value: row.get(2)?,
                        created_at: row.get(3)?,
                        last_accessed_at: row.get(4)?,
                        score: row.get(5)?,
                        description: row.get(6)?,
                        capture_kind: row.get(7)?,
                        expires_at: row.get(8)?,
                    })
                })?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut snapshot = VaultSnapshot::default();
        for row in rows {
            let trashed = row.collection == Collection::Trashed.to_string();
            let entry = row.into_entry()?;
            if trashed {
                snapshot.trashed.push(entry);
            } else {
                snapshot.active.push(entry);
            }
        }
        debug!(
            active = snapshot.active.len(),
            trashed = snapshot.trashed.len(),
            "vault snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &VaultSnapshot) -> Result<(), VigilError> {
        let rows: Vec<(String, usize, CredentialEntry)> = snapshot
            .active
            .iter()
            .enumerate()
            .map(|(i, e)| (Collection::Active.to_string(), i, e.clone()))
            .chain(
                snapshot
                    .trashed
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (Collection::Trashed.to_string(), i, e.clone())),
            )
            .collect();
        let count = rows.len();

        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM vault_entries", [])?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO vault_entries \
                         (id, collection, position, secret_value, created_at, last_accessed_at, \
                          score, description, capture_kind, expires_at) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    )?;
                    for (collection, position, entry) in &rows {
                        stmt.execute(params![
                            entry.id.as_str(),
                            collection,
                            *position as i64,
                            entry.secret_value,
                            entry.created_at.to_rfc3339(),
                            entry.last_accessed_at.map(|t| t.to_rfc3339()),
                            entry.score,
                            entry.description,
                            entry.capture_kind.to_string(),
                            entry.expires_at.map(|d| d.to_string()),
                        ])?;
                    }
                }
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;

        debug!(entries = count, "vault snapshot saved");
        Ok(())
    }
}

struct StoredRow {
    id: String,
    collection: String,
    secret_value: String,
    created_at: String,
    last_accessed_at: Option<String>,
    score: Option<f64>,
    description: Option<String>,
    capture_kind: String,
    expires_at: Option<String>,
}

impl StoredRow {
    fn into_entry(self) -> Result<CredentialEntry, VigilError> {
        let capture_kind = self
            .capture_kind
            .parse::<CaptureKind>()
            .map_err(|_| corrupt(&self.id, "capture_kind", &self.capture_kind))?;
        let created_at = parse_timestamp(&self.id, "created_at", &self.created_at)?;
        let last_accessed_at = self
            .last_accessed_at
            .as_deref()
            .map(|raw| parse_timestamp(&self.id, "last_accessed_at", raw))
            .transpose()?;
        let expires_at = self
            .expires_at
            .as_deref()
            .map(|raw| {
                raw.parse::<NaiveDate>()
                    .map_err(|_| corrupt(&self.id, "expires_at", raw))
            })
            .transpose()?;

        Ok(CredentialEntry {
            id: EntryId(self.id),
            secret_value: self.secret_value,
            created_at,
            last_accessed_at,
            score: self.score,
            description: self.description,
            capture_kind,
            expires_at,
        })
    }
}

fn parse_timestamp(id: &str, column: &str, raw: &str) -> Result<DateTime<Utc>, VigilError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| corrupt(id, column, raw))
}

fn corrupt(id: &str, column: &str, raw: &str) -> VigilError {
    VigilError::Vault(format!("entry {id} has unreadable {column}: {raw:?}"))
}

fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> VigilError {
    VigilError::Vault(format!("vault database error: {e}"))
}
