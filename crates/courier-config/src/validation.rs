// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: non-empty paths, positive timeouts, unique agent names and
//! well-formed agent URLs.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CourierConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of failing on the first one.
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        invalid(format!(
            "log_level `{}` must be one of {}",
            config.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.remote.timeout_secs == 0 {
        invalid("remote.timeout_secs must be greater than 0".to_string());
    }
    if config.remote.connect_timeout_secs == 0 {
        invalid("remote.connect_timeout_secs must be greater than 0".to_string());
    }

    if config.storage.enabled && config.storage.database_path.trim().is_empty() {
        invalid("storage.database_path must not be empty".to_string());
    }

    let mut seen_names = HashSet::new();
    for (i, agent) in config.agents.iter().enumerate() {
        if agent.name.trim().is_empty() {
            invalid(format!("agents[{i}].name must not be empty"));
        } else if !seen_names.insert(agent.name.as_str()) {
            invalid(format!(
                "duplicate agent name `{}` in [[agents]] array",
                agent.name
            ));
        }

        let url = agent.url.trim();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"));
        if host.is_none_or(|rest| rest.is_empty() || rest.starts_with('/')) {
            invalid(format!(
                "agents[{i}].url `{}` must be an http:// or https:// URL with a host",
                agent.url
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
