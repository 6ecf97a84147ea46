// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed report filter rendered to parameterised SQL.
//!
//! Only placeholder names generated here ever reach the SQL text; every
//! caller-supplied value travels as a named binding.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;

use courier_core::ReportQuery;

const SELECT_REPORTS: &str = "SELECT id, timestamp_ms, agent_name, request_id, request_text, \
     response_code, response_text, route_time_us, agent_time_us FROM reports";

/// One restriction on the reports returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Stamped strictly after the instant.
    After(DateTime<Utc>),
    /// Stamped strictly before the instant.
    Before(DateTime<Utc>),
    /// Routed to one of the named agents. Never empty.
    AgentIn(Vec<String>),
}

/// Clauses ANDed together plus an optional row limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    clauses: Vec<Clause>,
    limit: Option<u32>,
}

/// SQL text with its named bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

impl ReportFilter {
    /// A filter matching every report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower bound (exclusive). Replaces any earlier lower bound.
    pub fn after(mut self, start: DateTime<Utc>) -> Self {
        self.clauses.retain(|c| !matches!(c, Clause::After(_)));
        self.clauses.push(Clause::After(start));
        self
    }

    /// Upper bound (exclusive). Replaces any earlier upper bound.
    pub fn before(mut self, end: DateTime<Utc>) -> Self {
        self.clauses.retain(|c| !matches!(c, Clause::Before(_)));
        self.clauses.push(Clause::Before(end));
        self
    }

    /// Restrict to the given agents, replacing any earlier agent list.
    /// An empty list imposes no restriction.
    pub fn agent_in(mut self, names: Vec<String>) -> Self {
        self.clauses.retain(|c| !matches!(c, Clause::AgentIn(_)));
        if !names.is_empty() {
            self.clauses.push(Clause::AgentIn(names));
        }
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Render the filter as a `SELECT` ordered by timestamp, then insertion order.
    pub fn to_sql(&self) -> SqlStatement {
        let mut conditions = Vec::with_capacity(self.clauses.len());
        let mut params = Vec::new();

        for clause in &self.clauses {
            match clause {
                Clause::After(start) => {
                    conditions.push("timestamp_ms > :ts_start".to_string());
                    params.push((
                        ":ts_start".to_string(),
                        Value::Integer(start.timestamp_millis()),
                    ));
                }
                Clause::Before(end) => {
                    conditions.push("timestamp_ms < :ts_stop".to_string());
                    params.push((":ts_stop".to_string(), Value::Integer(ceil_millis(end))));
                }
                Clause::AgentIn(names) => {
                    let placeholders: Vec<String> =
                        (0..names.len()).map(|i| format!(":agent_{i}")).collect();
                    conditions.push(format!("agent_name IN ({})", placeholders.join(", ")));
                    params.extend(
                        placeholders
                            .into_iter()
                            .zip(names.iter().cloned().map(Value::Text)),
                    );
                }
            }
        }

        let mut sql = SELECT_REPORTS.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY timestamp_ms ASC, id ASC");
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT :limit");
            params.push((":limit".to_string(), Value::Integer(i64::from(limit))));
        }

        SqlStatement { sql, params }
    }
}

/// Round up to whole milliseconds.
///
/// Stored timestamps are whole milliseconds, so `ts < ceil(end)` selects
/// exactly the rows with `ts < end`. The lower bound needs no adjustment:
/// `ts > floor(start)` already equals `ts > start`.
fn ceil_millis(instant: &DateTime<Utc>) -> i64 {
    let millis = instant.timestamp_millis();
    if instant.timestamp_subsec_nanos() % 1_000_000 == 0 {
        millis
    } else {
        millis.saturating_add(1)
    }
}

impl From<&ReportQuery> for ReportFilter {
    fn from(query: &ReportQuery) -> Self {
        let mut filter = Self::new();
        if let Some(start) = query.start_date {
            filter = filter.after(start);
        }
        if let Some(end) = query.end_date {
            filter = filter.before(end);
        }
        if let Some(names) = &query.agent_names {
            filter = filter.agent_in(names.clone());
        }
        if let Some(limit) = query.limit {
            filter = filter.limit(limit);
        }
        filter
    }
}
