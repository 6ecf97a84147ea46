// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Courier.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Courier configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP transport settings shared by all remote agents.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Report store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote agents reachable over HTTP.
    #[serde(default)]
    pub agents: Vec<RemoteAgentConfig>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            remote: RemoteConfig::default(),
            storage: StorageConfig::default(),
            agents: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("courier/{}", env!("CARGO_PKG_VERSION"))
}

/// Report store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Persist reports. When disabled, reports are discarded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("courier").join("reports.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("reports.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// One remote agent entry from the `[[agents]]` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteAgentConfig {
    /// Name used for routing and in reports. Must be unique.
    pub name: String,

    /// Base URL of the agent service; `request` and `ping` are resolved against it.
    pub url: String,

    /// Human-readable description of what the agent does.
    #[serde(default)]
    pub description: String,
}
