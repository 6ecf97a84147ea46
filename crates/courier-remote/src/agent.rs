// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent wrapper for remote web services implementing the agent API.
//!
//! A remote agent exposes two endpoints under its base URL:
//! `POST {base}request` taking a JSON [`AgentRequest`] and answering a JSON
//! [`AgentResponse`], and `GET {base}ping` answering the JSON string `"pong"`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use courier_config::RemoteAgentConfig;
use courier_core::{
    Agent, AgentRequest, AgentResponse, HealthStatus, HttpTransport, StatusCode, APPLICATION_JSON,
};

const REQUEST_ENDPOINT: &str = "request";
const PING_ENDPOINT: &str = "ping";
const PING_RESPONSE: &str = "pong";

/// Client for one remote agent service.
///
/// Holds no per-call state; the shared transport owns connections, so a
/// `RemoteAgent` can be used concurrently from many tasks.
pub struct RemoteAgent {
    name: String,
    description: String,
    url_base: String,
    request_url: String,
    ping_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl RemoteAgent {
    /// Create a remote agent rooted at `url_base`.
    ///
    /// The name defaults to the normalized base URL.
    pub fn new(url_base: &str, transport: Arc<dyn HttpTransport>) -> Self {
        let url_base = normalize_base(url_base);
        Self {
            name: url_base.clone(),
            description: String::new(),
            request_url: format!("{url_base}{REQUEST_ENDPOINT}"),
            ping_url: format!("{url_base}{PING_ENDPOINT}"),
            url_base,
            transport,
        }
    }

    /// Create a remote agent from an `[[agents]]` config entry.
    pub fn from_config(config: &RemoteAgentConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(&config.url, transport)
            .with_name(&config.name)
            .with_description(&config.description)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Base URL, always ending in exactly one `/`.
    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn ping_url(&self) -> &str {
        &self.ping_url
    }

    /// Is the remote agent available?
    ///
    /// True only when the ping endpoint answers the JSON string `"pong"`.
    pub async fn ping(&self) -> bool {
        let Some(body) = self.transport.get(&self.ping_url).await else {
            debug!(agent = %self.name, url = %self.ping_url, "no ping response");
            return false;
        };
        match serde_json::from_str::<String>(&body) {
            Ok(text) => text == PING_RESPONSE,
            Err(e) => {
                warn!(
                    agent = %self.name,
                    url = %self.ping_url,
                    reason = %e,
                    body = %body,
                    "invalid json for ping response"
                );
                false
            }
        }
    }
}

#[async_trait]
impl Agent for RemoteAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn process(&self, request: &AgentRequest) -> AgentResponse {
        let json = match serde_json::to_string(request) {
            Ok(json) => json,
            Err(e) => {
                error!(agent = %self.name, error = %e, "failed to serialize agent request");
                return AgentResponse::from_status(StatusCode::InternalError);
            }
        };

        let Some(body) = self
            .transport
            .post(&self.request_url, json, APPLICATION_JSON)
            .await
        else {
            debug!(agent = %self.name, url = %self.request_url, "no response from remote agent");
            return AgentResponse::from_status(StatusCode::NoResponse);
        };

        match decode_response(&body) {
            Ok(response) => {
                debug!(
                    agent = %self.name,
                    status = %response.status_code(),
                    "remote agent responded"
                );
                response
            }
            Err(e) => {
                warn!(
                    agent = %self.name,
                    url = %self.request_url,
                    reason = %e,
                    body = %body,
                    "invalid json for request"
                );
                AgentResponse::from_status(StatusCode::InvalidResponse)
            }
        }
    }

    async fn health_check(&self) -> HealthStatus {
        if self.ping().await {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy(format!("no pong from {}", self.ping_url))
        }
    }
}

/// Strip a single trailing slash, then append exactly one.
pub fn normalize_base(url_base: &str) -> String {
    let trimmed = url_base.strip_suffix('/').unwrap_or(url_base);
    format!("{trimmed}/")
}

/// Decode and validate a response body in one step.
///
/// Fails on anything that is not a JSON object, on an unknown `statusCode`,
/// and on a `SUCCESS` claim that carries no `text`. A missing `statusCode`
/// reads as `SUCCESS`. Unknown fields are ignored.
pub fn decode_response(body: &str) -> Result<AgentResponse, serde_json::Error> {
    serde_json::from_str(body)
}
