// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport collaborator used by remote agents.

use async_trait::async_trait;

/// Content type for JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Minimal HTTP capability: send a request, get a body back or nothing.
///
/// `None` means the transport already absorbed a failure (connection error,
/// timeout, non-2xx status, unreadable body). Implementations own pooling,
/// timeouts, and logging of those failures.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// POST `body` with the given content type and return the response body.
    async fn post(&self, url: &str, body: String, content_type: &str) -> Option<String>;

    /// GET `url` and return the response body.
    async fn get(&self, url: &str) -> Option<String>;
}
