// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent trait implemented by anything a dispatcher can route requests to.

use async_trait::async_trait;

use crate::types::{AgentRequest, AgentResponse, HealthStatus};

/// An agent able to answer dispatched requests.
///
/// `process` is infallible by contract: every outcome, including a broken
/// or unreachable agent, is expressed as an [`AgentResponse`] status.
#[async_trait]
pub trait Agent: Send + Sync + 'static {
    /// Returns the name the dispatcher and reports use for this agent.
    fn name(&self) -> &str;

    /// Returns a short human-readable description of what the agent does.
    fn description(&self) -> &str;

    /// Handles one request.
    async fn process(&self, request: &AgentRequest) -> AgentResponse;

    /// Reports whether the agent is currently able to take requests.
    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
