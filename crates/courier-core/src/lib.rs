// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Courier.
//!
//! This crate provides the error type, the request/response and report
//! types, and the seam traits (`Agent`, `HttpTransport`, `Reporter`) shared
//! by the remote agent client and the report store.

pub mod error;
pub mod report;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CourierError;
pub use report::{Report, ReportQuery};
pub use types::{AgentRequest, AgentResponse, HealthStatus, ResponseError, StatusCode};

pub use traits::{Agent, HttpTransport, Reporter, APPLICATION_JSON};
