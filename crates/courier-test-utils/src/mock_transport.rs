// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock HTTP transport for deterministic remote agent tests.
//!
//! `MockTransport` implements `HttpTransport` with pre-configured replies,
//! so remote agent behavior can be tested without a live server.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::HttpTransport;

/// One call observed by a [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Post {
        url: String,
        body: String,
        content_type: String,
    },
    Get {
        url: String,
    },
}

/// A transport that returns queued replies in FIFO order.
///
/// A `None` reply simulates a transport failure. When a queue runs dry the
/// transport keeps answering `None`.
#[derive(Default)]
pub struct MockTransport {
    post_replies: Mutex<VecDeque<Option<String>>>,
    get_replies: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body for the next POST.
    pub fn with_post_body(mut self, body: impl Into<String>) -> Self {
        self.post_replies.get_mut().push_back(Some(body.into()));
        self
    }

    /// Queue a transport failure for the next POST.
    pub fn with_post_failure(mut self) -> Self {
        self.post_replies.get_mut().push_back(None);
        self
    }

    /// Queue a body for the next GET.
    pub fn with_get_body(mut self, body: impl Into<String>) -> Self {
        self.get_replies.get_mut().push_back(Some(body.into()));
        self
    }

    /// Queue a transport failure for the next GET.
    pub fn with_get_failure(mut self) -> Self {
        self.get_replies.get_mut().push_back(None);
        self
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, url: &str, body: String, content_type: &str) -> Option<String> {
        self.calls.lock().await.push(RecordedCall::Post {
            url: url.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        self.post_replies.lock().await.pop_front().flatten()
    }

    async fn get(&self, url: &str) -> Option<String> {
        self.calls.lock().await.push(RecordedCall::Get {
            url: url.to_string(),
        });
        self.get_replies.lock().await.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_none() {
        let transport = MockTransport::new()
            .with_post_body("first")
            .with_post_failure()
            .with_post_body("third");

        assert_eq!(transport.post("u", "a".into(), "t").await.as_deref(), Some("first"));
        assert_eq!(transport.post("u", "b".into(), "t").await, None);
        assert_eq!(transport.post("u", "c".into(), "t").await.as_deref(), Some("third"));
        assert_eq!(transport.post("u", "d".into(), "t").await, None);
        assert_eq!(transport.calls().await.len(), 4);
    }

    #[tokio::test]
    async fn records_get_and_post_separately() {
        let transport = MockTransport::new().with_get_body("\"pong\"");
        assert_eq!(transport.get("http://x/ping").await.as_deref(), Some("\"pong\""));
        transport.post("http://x/request", "{}".into(), "application/json").await;

        assert_eq!(
            transport.calls().await,
            vec![
                RecordedCall::Get {
                    url: "http://x/ping".into()
                },
                RecordedCall::Post {
                    url: "http://x/request".into(),
                    body: "{}".into(),
                    content_type: "application/json".into(),
                },
            ]
        );
    }
}
