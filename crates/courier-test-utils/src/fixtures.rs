// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report fixtures with deterministic timestamps.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use courier_core::{AgentResponse, Report};

/// Fixed reference instant: 2026-01-01T00:00:00Z.
pub const BASE_MILLIS: i64 = 1_767_225_600_000;

/// The instant `offset_secs` seconds after [`BASE_MILLIS`].
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(BASE_MILLIS + offset_secs * 1_000)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A successful report for `agent` stamped `offset_secs` after the base instant.
pub fn report_at(agent: &str, offset_secs: i64) -> Report {
    Report::new(
        uuid::Uuid::new_v4().to_string(),
        format!("request for {agent}"),
        agent,
    )
    .with_timestamp(at(offset_secs))
    .with_response(&AgentResponse::success(format!("answer from {agent}")))
    .with_route_time(Duration::from_micros(150))
    .with_agent_time(Duration::from_millis(42))
}
