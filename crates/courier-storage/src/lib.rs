// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite report store for Courier.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, a typed report filter, and the
//! [`SqliteReporter`] implementation of the `Reporter` trait.

pub mod database;
pub mod filter;
pub mod migrations;
pub mod queries;
pub mod reporter;

pub use database::Database;
pub use filter::{Clause, ReportFilter, SqlStatement};
pub use reporter::{NullReporter, SqliteReporter};
