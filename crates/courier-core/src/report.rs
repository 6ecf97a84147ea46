// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch reports and the query type used to look them up.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AgentResponse, StatusCode};

/// Record of one dispatch outcome.
///
/// Timestamps are kept at millisecond precision and durations at
/// microsecond precision, matching what the report store persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    timestamp: DateTime<Utc>,
    agent_name: String,
    request_id: String,
    request_text: String,
    response_code: StatusCode,
    response_text: Option<String>,
    route_time: Duration,
    agent_time: Duration,
}

impl Report {
    /// Start a report for a request routed to `agent_name`, stamped now.
    ///
    /// The outcome defaults to `NoResponse` until [`Report::with_response`]
    /// records what the agent returned.
    pub fn new(
        request_id: impl Into<String>,
        request_text: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Self {
        Self::stamped(Utc::now(), request_id, request_text, agent_name)
    }

    /// Start a report stamped at `timestamp` (truncated to milliseconds).
    pub fn stamped(
        timestamp: DateTime<Utc>,
        request_id: impl Into<String>,
        request_text: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(3),
            agent_name: agent_name.into(),
            request_id: request_id.into(),
            request_text: request_text.into(),
            response_code: StatusCode::NoResponse,
            response_text: None,
            route_time: Duration::ZERO,
            agent_time: Duration::ZERO,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    /// Record the agent's response as this report's outcome.
    pub fn with_response(self, response: &AgentResponse) -> Self {
        self.with_outcome(
            response.status_code(),
            response.text().map(str::to_owned),
        )
    }

    pub fn with_outcome(mut self, code: StatusCode, text: Option<String>) -> Self {
        self.response_code = code;
        self.response_text = text;
        self
    }

    pub fn with_route_time(mut self, route_time: Duration) -> Self {
        self.route_time = truncate_micros(route_time);
        self
    }

    pub fn with_agent_time(mut self, agent_time: Duration) -> Self {
        self.agent_time = truncate_micros(agent_time);
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn request_text(&self) -> &str {
        &self.request_text
    }

    pub fn response_code(&self) -> StatusCode {
        self.response_code
    }

    pub fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    pub fn route_time(&self) -> Duration {
        self.route_time
    }

    pub fn agent_time(&self) -> Duration {
        self.agent_time
    }
}

fn truncate_micros(duration: Duration) -> Duration {
    Duration::from_micros(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX))
}

/// Filter over stored reports.
///
/// Every field is optional; an unset field imposes no constraint. Date
/// bounds are exclusive on both sides. `limit: None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub agent_names: Option<Vec<String>>,
    pub limit: Option<u32>,
}

impl ReportQuery {
    /// A query matching every stored report.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only reports stamped strictly after `start`.
    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Only reports stamped strictly before `end`.
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn for_agents<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.agent_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_report_defaults_to_no_response() {
        let report = Report::new("req-1", "hello", "echo");
        assert_eq!(report.response_code(), StatusCode::NoResponse);
        assert!(report.response_text().is_none());
        assert_eq!(report.route_time(), Duration::ZERO);
        assert_eq!(report.timestamp().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn stamped_report_keeps_given_instant() {
        let ts = Utc.timestamp_nanos(1_700_000_000_987_654_321);
        let report = Report::stamped(ts, "req-1", "hello", "echo");
        assert_eq!(report.timestamp().timestamp_millis(), 1_700_000_000_987);
        assert_eq!(report.response_code(), StatusCode::NoResponse);
        assert_eq!(report, Report::new("req-1", "hello", "echo").with_timestamp(ts));
    }

    #[test]
    fn with_response_copies_status_and_text() {
        let report =
            Report::new("req-1", "hello", "echo").with_response(&AgentResponse::success("hi"));
        assert_eq!(report.response_code(), StatusCode::Success);
        assert_eq!(report.response_text(), Some("hi"));
    }

    #[test]
    fn timestamps_and_durations_are_truncated() {
        let ts = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let report = Report::new("req-1", "hello", "echo")
            .with_timestamp(ts)
            .with_agent_time(Duration::from_nanos(2_500));
        assert_eq!(report.timestamp().timestamp_millis(), 1_700_000_000_123);
        assert_eq!(report.timestamp().timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(report.agent_time(), Duration::from_micros(2));
    }

    #[test]
    fn query_builder_sets_fields() {
        let start = Utc.timestamp_millis_opt(1_000).unwrap();
        let end = Utc.timestamp_millis_opt(2_000).unwrap();
        let query = ReportQuery::all()
            .since(start)
            .until(end)
            .for_agents(["weather", "traffic"])
            .with_limit(5);
        assert_eq!(query.start_date, Some(start));
        assert_eq!(query.end_date, Some(end));
        assert_eq!(
            query.agent_names,
            Some(vec!["weather".to_string(), "traffic".to_string()])
        );
        assert_eq!(query.limit, Some(5));
        assert_eq!(ReportQuery::all(), ReportQuery::default());
    }
}
