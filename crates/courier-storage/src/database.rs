// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use courier_core::CourierError;
use tracing::{debug, info};

use crate::migrations::run_migrations;

const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Handle to the report database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` in WAL mode and migrate it.
    pub async fn open(path: &str) -> Result<Self, CourierError> {
        Self::open_with(path, true).await
    }

    /// Open (or create) the database at `path` and migrate it.
    ///
    /// Missing parent directories are created.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, CourierError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(CourierError::storage)?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| CourierError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        info!(path, wal_mode, "report database opened");
        Ok(db)
    }

    /// Open a private in-memory database, migrated and ready for use.
    pub async fn open_in_memory() -> Result<Self, CourierError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| CourierError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    /// The underlying connection. Query modules go through `call()` on it.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn close(&self) -> Result<(), CourierError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), CourierError> {
        self.conn
            .call(move |conn| -> Result<(), CourierError> {
                if wal_mode {
                    let mode: String = conn
                        .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
                        .map_err(CourierError::storage)?;
                    debug!(journal_mode = %mode, "journal mode set");
                    conn.execute_batch("PRAGMA synchronous = NORMAL;")
                        .map_err(CourierError::storage)?;
                }
                conn.execute_batch(&format!(
                    "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}; PRAGMA foreign_keys = ON;"
                ))
                .map_err(CourierError::storage)?;
                run_migrations(conn)
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Convert a tokio-rusqlite error into `CourierError::Storage`.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> CourierError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CourierError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn table_names(db: &Database) -> Vec<String> {
        db.connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_in_memory_runs_migrations() {
        let db = Database::open_in_memory().await.unwrap();
        let tables = table_names(&db).await;
        assert!(tables.contains(&"reports".to_string()), "got: {tables:?}");
        assert!(tables.contains(&"refinery_schema_history".to_string()));
    }

    #[tokio::test]
    async fn open_creates_file_in_wal_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("reports.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists(), "database file should be created");

        let mode = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports.db");
        let path = path.to_str().unwrap();

        let first = Database::open_with(path, false).await.unwrap();
        first.close().await.unwrap();
        drop(first);

        let second = Database::open_with(path, false).await.unwrap();
        assert!(table_names(&second).await.contains(&"reports".to_string()));
    }
}
