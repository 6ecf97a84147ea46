// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Courier: remote agent client and dispatch report store.
//!
//! This crate wires the component crates together from a loaded
//! [`CourierConfig`]: one pooled HTTP transport shared by every configured
//! remote agent, and the report store selected by `[storage]`.

use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use courier_config::{CourierConfig, RemoteAgentConfig, RemoteConfig, StorageConfig};
pub use courier_core::{
    Agent, AgentRequest, AgentResponse, CourierError, HealthStatus, HttpTransport, Report,
    ReportQuery, Reporter, StatusCode,
};
pub use courier_remote::{RemoteAgent, ReqwestTransport};
pub use courier_storage::{NullReporter, SqliteReporter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise Courier crates log at `log_level`
/// and everything else at `warn`. Call once per process.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(format!("courier={log_level},warn"))
}

/// Build one [`RemoteAgent`] per `[[agents]]` entry, all sharing one transport.
pub fn build_agents(config: &CourierConfig) -> Result<Vec<RemoteAgent>, CourierError> {
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.remote)?);
    let agents: Vec<RemoteAgent> = config
        .agents
        .iter()
        .map(|entry| RemoteAgent::from_config(entry, transport.clone()))
        .collect();
    for agent in &agents {
        debug!(agent = %agent.name(), url = %agent.url_base(), "remote agent configured");
    }
    info!(count = agents.len(), "remote agents ready");
    Ok(agents)
}

/// Open the report store selected by `[storage]`.
///
/// Disabled storage yields a [`NullReporter`].
pub async fn open_reporter(config: &StorageConfig) -> Result<Arc<dyn Reporter>, CourierError> {
    if !config.enabled {
        info!("report storage disabled");
        return Ok(Arc::new(NullReporter));
    }
    let reporter = SqliteReporter::open(config).await?;
    Ok(Arc::new(reporter))
}
