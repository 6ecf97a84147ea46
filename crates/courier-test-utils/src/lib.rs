// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Courier.
//!
//! Provides a scripted HTTP transport and report fixtures for fast,
//! deterministic tests without network services.
//!
//! # Components
//!
//! - [`MockTransport`] - `HttpTransport` that replays queued bodies and records calls
//! - [`fixtures`] - report builders with fixed timestamps

pub mod fixtures;
pub mod mock_transport;

pub use mock_transport::{MockTransport, RecordedCall};
