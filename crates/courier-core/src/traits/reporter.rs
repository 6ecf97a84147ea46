// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter trait for persisting and querying dispatch reports.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::report::{Report, ReportQuery};

/// Durable sink for dispatch reports.
///
/// Infrastructure failures are surfaced as errors rather than swallowed;
/// a lost report must be visible to the caller.
#[async_trait]
pub trait Reporter: Send + Sync + 'static {
    /// Persists one report atomically.
    async fn store(&self, report: &Report) -> Result<(), CourierError>;

    /// Returns copies of the reports matching `query`.
    async fn retrieve(&self, query: &ReportQuery) -> Result<Vec<Report>, CourierError>;
}
