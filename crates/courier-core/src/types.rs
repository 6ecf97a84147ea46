// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types exchanged with agents.

use std::collections::BTreeMap;

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Health status reported by agent and reporter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Not operational.
    Unhealthy(String),
}

/// Outcome code of a dispatch attempt.
///
/// Serialized on the wire as its integer code (see [`StatusCode::code`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(into = "u16", try_from = "i64")]
pub enum StatusCode {
    Success,
    InternalError,
    NoAvailableAgent,
    NoResponse,
    InvalidResponse,
    AgentDidNotUnderstandRequest,
    AgentDidNotKnowAnswer,
    AgentCannotCompleteAction,
    AgentInternalError,
}

impl StatusCode {
    /// Integer code used on the wire and in storage.
    pub fn code(self) -> u16 {
        match self {
            Self::Success => 0,
            Self::InternalError => 100,
            Self::NoAvailableAgent => 101,
            Self::NoResponse => 102,
            Self::InvalidResponse => 103,
            Self::AgentDidNotUnderstandRequest => 200,
            Self::AgentDidNotKnowAnswer => 201,
            Self::AgentCannotCompleteAction => 202,
            Self::AgentInternalError => 203,
        }
    }

    /// Looks up a status by its integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        let status = match code {
            0 => Self::Success,
            100 => Self::InternalError,
            101 => Self::NoAvailableAgent,
            102 => Self::NoResponse,
            103 => Self::InvalidResponse,
            200 => Self::AgentDidNotUnderstandRequest,
            201 => Self::AgentDidNotKnowAnswer,
            202 => Self::AgentCannotCompleteAction,
            203 => Self::AgentInternalError,
            _ => return None,
        };
        Some(status)
    }

    /// Default user-facing message for this status.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Success.",
            Self::InternalError => "Something failed while handling this request.",
            Self::NoAvailableAgent => "No agent is available to handle this request.",
            Self::NoResponse => "The agent did not provide a response.",
            Self::InvalidResponse => "The agent returned an invalid response.",
            Self::AgentDidNotUnderstandRequest => "The agent did not understand the request.",
            Self::AgentDidNotKnowAnswer => "The agent did not know the answer.",
            Self::AgentCannotCompleteAction => "The agent could not complete the requested action.",
            Self::AgentInternalError => "The agent failed while handling the request.",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for StatusCode {
    type Error = ResponseError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(ResponseError::UnknownStatus(code))
    }
}

/// A request dispatched to an agent.
///
/// Immutable once constructed; metadata is attached with the builder
/// methods before the request is handed to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl AgentRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches one metadata entry, replacing any previous value for `key`.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

/// Why a decoded response body was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("unknown statusCode {0}")]
    UnknownStatus(i64),

    #[error("statusCode SUCCESS without text")]
    SuccessWithoutText,
}

/// Result of a dispatch attempt.
///
/// A `Success` response always carries text: there is no constructor that
/// produces one without it, and deserialization rejects bodies that claim
/// success without a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireResponse")]
pub struct AgentResponse {
    status_code: StatusCode,
    text: Option<String>,
}

impl AgentResponse {
    /// A successful response carrying the agent's answer.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::Success,
            text: Some(text.into()),
        }
    }

    /// A response with only a status. `Success` is downgraded to
    /// `InvalidResponse` since it would carry no result.
    pub fn from_status(status_code: StatusCode) -> Self {
        let status_code = if status_code.is_success() {
            StatusCode::InvalidResponse
        } else {
            status_code
        };
        Self {
            status_code,
            text: None,
        }
    }

    /// A response with a status and accompanying text.
    pub fn with_text(status_code: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status_code,
            text: Some(text.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }
}

/// Lenient wire shape: every field optional, unknown fields ignored.
///
/// Only a JSON object is accepted; arrays and scalars are rejected even
/// when their elements line up with the fields.
struct WireResponse {
    status_code: Option<i64>,
    text: Option<String>,
}

impl<'de> Deserialize<'de> for WireResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WireResponseVisitor)
    }
}

struct WireResponseVisitor;

impl<'de> Visitor<'de> for WireResponseVisitor {
    type Value = WireResponse;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with statusCode and text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut status_code: Option<Option<i64>> = None;
        let mut text: Option<Option<String>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "statusCode" => {
                    if status_code.is_some() {
                        return Err(de::Error::duplicate_field("statusCode"));
                    }
                    status_code = Some(map.next_value()?);
                }
                "text" => {
                    if text.is_some() {
                        return Err(de::Error::duplicate_field("text"));
                    }
                    text = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(WireResponse {
            status_code: status_code.flatten(),
            text: text.flatten(),
        })
    }
}

impl TryFrom<WireResponse> for AgentResponse {
    type Error = ResponseError;

    // An absent or null statusCode reads as 0 (SUCCESS), so the text check decides.
    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        let code = wire.status_code.unwrap_or(0);
        let status_code = StatusCode::try_from(code)?;
        match (status_code, wire.text) {
            (StatusCode::Success, None) => Err(ResponseError::SuccessWithoutText),
            (status_code, text) => Ok(Self { status_code, text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn status_code_round_trips_through_integer_codes() {
        for status in [
            StatusCode::Success,
            StatusCode::InternalError,
            StatusCode::NoAvailableAgent,
            StatusCode::NoResponse,
            StatusCode::InvalidResponse,
            StatusCode::AgentDidNotUnderstandRequest,
            StatusCode::AgentDidNotKnowAnswer,
            StatusCode::AgentCannotCompleteAction,
            StatusCode::AgentInternalError,
        ] {
            assert_eq!(StatusCode::from_code(i64::from(status.code())), Some(status));
        }
        assert_eq!(StatusCode::from_code(7), None);
    }

    #[test]
    fn status_code_display_and_parse() {
        assert_eq!(StatusCode::NoResponse.to_string(), "NO_RESPONSE");
        assert_eq!(
            StatusCode::from_str("INVALID_RESPONSE").unwrap(),
            StatusCode::InvalidResponse
        );
    }

    #[test]
    fn status_code_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&StatusCode::NoResponse).unwrap(), "102");
        let parsed: StatusCode = serde_json::from_str("203").unwrap();
        assert_eq!(parsed, StatusCode::AgentInternalError);
        assert!(serde_json::from_str::<StatusCode>("999").is_err());
    }

    #[test]
    fn request_wire_format_omits_empty_metadata() {
        let plain = AgentRequest::new("what is the weather?");
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            serde_json::json!({"text": "what is the weather?"})
        );

        let tagged = plain.with_metadata("user", "alice");
        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            serde_json::json!({"text": "what is the weather?", "metadata": {"user": "alice"}})
        );
    }

    #[test]
    fn response_wire_format_keeps_null_text() {
        let response = AgentResponse::from_status(StatusCode::AgentDidNotKnowAnswer);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"statusCode": 201, "text": null})
        );
    }

    #[test]
    fn from_status_never_builds_success_without_text() {
        let response = AgentResponse::from_status(StatusCode::Success);
        assert_eq!(response.status_code(), StatusCode::InvalidResponse);
        assert!(response.text().is_none());
    }

    #[test]
    fn decode_accepts_success_with_text_and_ignores_extra_fields() {
        let response: AgentResponse =
            serde_json::from_str(r#"{"statusCode":0,"text":"sunny","extra":[1,2]}"#).unwrap();
        assert_eq!(response, AgentResponse::success("sunny"));
    }

    #[test]
    fn decode_rejects_success_without_text() {
        let err = serde_json::from_str::<AgentResponse>(r#"{"statusCode":0}"#).unwrap_err();
        assert!(err.to_string().contains("SUCCESS without text"), "got: {err}");

        let err =
            serde_json::from_str::<AgentResponse>(r#"{"statusCode":0,"text":null}"#).unwrap_err();
        assert!(err.to_string().contains("SUCCESS without text"), "got: {err}");
    }

    #[test]
    fn decode_treats_missing_status_as_success() {
        let response: AgentResponse = serde_json::from_str(r#"{"text":"answer"}"#).unwrap();
        assert_eq!(response, AgentResponse::success("answer"));

        let response: AgentResponse =
            serde_json::from_str(r#"{"statusCode":null,"text":"answer"}"#).unwrap();
        assert_eq!(response, AgentResponse::success("answer"));

        let err = serde_json::from_str::<AgentResponse>("{}").unwrap_err();
        assert!(err.to_string().contains("SUCCESS without text"), "got: {err}");
    }

    #[test]
    fn decode_rejects_unknown_status() {
        let err = serde_json::from_str::<AgentResponse>(r#"{"statusCode":42}"#).unwrap_err();
        assert!(err.to_string().contains("unknown statusCode 42"), "got: {err}");
    }

    #[test]
    fn decode_accepts_failure_status_without_text() {
        let response: AgentResponse = serde_json::from_str(r#"{"statusCode":200}"#).unwrap();
        assert_eq!(
            response.status_code(),
            StatusCode::AgentDidNotUnderstandRequest
        );
        assert!(response.text().is_none());
    }

    #[test]
    fn decode_rejects_wrong_types() {
        assert!(serde_json::from_str::<AgentResponse>(r#"{"statusCode":"0","text":"x"}"#).is_err());
        assert!(serde_json::from_str::<AgentResponse>(r#"{"statusCode":0,"text":5}"#).is_err());
        assert!(serde_json::from_str::<AgentResponse>(r#""pong""#).is_err());
        assert!(serde_json::from_str::<AgentResponse>("null").is_err());
    }

    #[test]
    fn decode_rejects_arrays_shaped_like_a_response() {
        assert!(serde_json::from_str::<AgentResponse>(r#"[0,"sunny"]"#).is_err());
        assert!(serde_json::from_str::<AgentResponse>(r#"[201]"#).is_err());
        assert!(serde_json::from_str::<AgentResponse>("[]").is_err());
    }

    #[test]
    fn decode_rejects_duplicate_fields() {
        let body = r#"{"statusCode":201,"statusCode":0,"text":"x"}"#;
        assert!(serde_json::from_str::<AgentResponse>(body).is_err());
    }

    proptest! {
        #[test]
        fn from_code_only_accepts_its_own_codes(code in any::<i64>()) {
            if let Some(status) = StatusCode::from_code(code) {
                prop_assert_eq!(i64::from(status.code()), code);
            }
        }
    }
}
