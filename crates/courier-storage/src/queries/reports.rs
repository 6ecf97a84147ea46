// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report insert and filtered lookup.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{Row, named_params};

use courier_core::{CourierError, Report, StatusCode};

use crate::database::{Database, map_tr_err};
use crate::filter::ReportFilter;

/// Insert one report inside its own transaction. Returns the row id.
pub async fn insert_report(db: &Database, report: &Report) -> Result<i64, CourierError> {
    let report = report.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO reports (timestamp_ms, agent_name, request_id, request_text, \
                 response_code, response_text, route_time_us, agent_time_us) \
                 VALUES (:timestamp_ms, :agent_name, :request_id, :request_text, \
                 :response_code, :response_text, :route_time_us, :agent_time_us)",
                named_params! {
                    ":timestamp_ms": report.timestamp().timestamp_millis(),
                    ":agent_name": report.agent_name(),
                    ":request_id": report.request_id(),
                    ":request_text": report.request_text(),
                    ":response_code": report.response_code().code(),
                    ":response_text": report.response_text(),
                    ":route_time_us": micros(report.route_time()),
                    ":agent_time_us": micros(report.agent_time()),
                },
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the reports matching `filter`, oldest first.
pub async fn query_reports(
    db: &Database,
    filter: &ReportFilter,
) -> Result<Vec<Report>, CourierError> {
    let stmt = filter.to_sql();
    db.connection()
        .call(move |conn| -> Result<Vec<Report>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let reports = {
                let params: Vec<(&str, &dyn ToSql)> = stmt
                    .params
                    .iter()
                    .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
                    .collect();
                let mut prepared = tx.prepare(&stmt.sql)?;
                let rows = prepared.query_map(params.as_slice(), report_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            };
            tx.commit()?;
            Ok(reports)
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored reports.
pub async fn count_reports(db: &Database) -> Result<i64, CourierError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
}

fn micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}

fn duration_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Duration> {
    let us: i64 = row.get(idx)?;
    u64::try_from(us)
        .map(Duration::from_micros)
        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, us))
}

// Columns follow the order of the filter's SELECT list.
fn report_from_row(row: &Row<'_>) -> rusqlite::Result<Report> {
    let timestamp_ms: i64 = row.get(1)?;
    let timestamp = Utc
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(1, timestamp_ms))?;

    let code: i64 = row.get(5)?;
    let response_code = StatusCode::try_from(code)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Integer, Box::new(e)))?;

    let agent_name: String = row.get(2)?;
    let request_id: String = row.get(3)?;
    let request_text: String = row.get(4)?;
    let response_text: Option<String> = row.get(6)?;

    Ok(Report::stamped(timestamp, request_id, request_text, agent_name)
        .with_outcome(response_code, response_text)
        .with_route_time(duration_at(row, 7)?)
        .with_agent_time(duration_at(row, 8)?))
}
