// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed HTTP transport.
//!
//! Every failure (connect error, timeout, non-2xx status, unreadable body)
//! is logged and absorbed into `None`. There is no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use courier_config::RemoteConfig;
use courier_core::{CourierError, HttpTransport};

/// Pooled HTTP transport shared by all remote agents.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with timeouts and user agent from `[remote]` config.
    pub fn new(config: &RemoteConfig) -> Result<Self, CourierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CourierError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self::with_client(client))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, url: &str, body: String, content_type: &str) -> Option<String> {
        let result = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await;
        read_body("POST", url, result).await
    }

    async fn get(&self, url: &str) -> Option<String> {
        let result = self.client.get(url).send().await;
        read_body("GET", url, result).await
    }
}

async fn read_body(
    method: &str,
    url: &str,
    result: Result<reqwest::Response, reqwest::Error>,
) -> Option<String> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!(method, url, error = %e, "HTTP request failed");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(method, url, status = %status, "HTTP request returned error status");
        return None;
    }

    match response.text().await {
        Ok(body) => {
            debug!(method, url, status = %status, bytes = body.len(), "HTTP response received");
            Some(body)
        }
        Err(e) => {
            warn!(method, url, error = %e, "failed to read HTTP response body");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::APPLICATION_JSON;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport() -> ReqwestTransport {
        ReqwestTransport::new(&RemoteConfig {
            timeout_secs: 2,
            connect_timeout_secs: 1,
            user_agent: "courier-test".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn post_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/agent/request"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", "courier-test"))
            .and(body_string(r#"{"text":"hi"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("reply"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/agent/request", server.uri());
        let body = test_transport()
            .post(&url, r#"{"text":"hi"}"#.into(), APPLICATION_JSON)
            .await;
        assert_eq!(body.as_deref(), Some("reply"));
    }

    #[tokio::test]
    async fn get_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/agent/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"pong\""))
            .mount(&server)
            .await;

        let url = format!("{}/agent/ping", server.uri());
        assert_eq!(test_transport().get(&url).await.as_deref(), Some("\"pong\""));
    }

    #[tokio::test]
    async fn error_status_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = test_transport();
        let url = format!("{}/x", server.uri());
        assert!(transport.post(&url, "{}".into(), APPLICATION_JSON).await.is_none());
        assert!(transport.get(&url).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_server_yields_none() {
        let server = MockServer::start().await;
        let url = format!("{}/ping", server.uri());
        drop(server);

        assert!(test_transport().get(&url).await.is_none());
    }

    #[tokio::test]
    async fn slow_server_times_out_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/ping", server.uri());
        assert!(test_transport().get(&url).await.is_none());
    }
}
