// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Reporter` implementations: SQLite-backed and discard-everything.

use async_trait::async_trait;
use tracing::{debug, warn};

use courier_config::StorageConfig;
use courier_core::{CourierError, HealthStatus, Report, ReportQuery, Reporter};

use crate::database::{Database, map_tr_err};
use crate::filter::ReportFilter;
use crate::queries;

/// Report store backed by a SQLite database.
///
/// Every call runs in its own transaction on the database's single
/// background thread; no transaction spans two calls.
#[derive(Clone)]
pub struct SqliteReporter {
    db: Database,
}

impl SqliteReporter {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database named by `[storage]` config.
    pub async fn open(config: &StorageConfig) -> Result<Self, CourierError> {
        let db = Database::open_with(&config.database_path, config.wal_mode).await?;
        Ok(Self::new(db))
    }

    pub async fn in_memory() -> Result<Self, CourierError> {
        Ok(Self::new(Database::open_in_memory().await?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Healthy when the database answers a trivial query.
    pub async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    /// Flush the WAL before shutdown.
    pub async fn close(&self) -> Result<(), CourierError> {
        self.db.close().await
    }
}

#[async_trait]
impl Reporter for SqliteReporter {
    async fn store(&self, report: &Report) -> Result<(), CourierError> {
        match queries::reports::insert_report(&self.db, report).await {
            Ok(id) => {
                debug!(
                    id,
                    agent = %report.agent_name(),
                    request_id = %report.request_id(),
                    status = %report.response_code(),
                    "report stored"
                );
                Ok(())
            }
            Err(e) => {
                warn!(request_id = %report.request_id(), error = %e, "failed to store report");
                Err(e)
            }
        }
    }

    async fn retrieve(&self, query: &ReportQuery) -> Result<Vec<Report>, CourierError> {
        let filter = ReportFilter::from(query);
        let reports = queries::reports::query_reports(&self.db, &filter).await?;
        debug!(count = reports.len(), "reports retrieved");
        Ok(reports)
    }
}

/// Reporter used when reporting is disabled: stores nothing, finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

#[async_trait]
impl Reporter for NullReporter {
    async fn store(&self, _report: &Report) -> Result<(), CourierError> {
        Ok(())
    }

    async fn retrieve(&self, _query: &ReportQuery) -> Result<Vec<Report>, CourierError> {
        Ok(Vec::new())
    }
}
