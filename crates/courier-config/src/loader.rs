// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./courier.toml` > `~/.config/courier/courier.toml` >
//! `/etc/courier/courier.toml`, with environment variable overrides via the
//! `COURIER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CourierConfig;

pub(crate) const LOCAL_CONFIG: &str = "courier.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/courier/courier.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("courier").join(LOCAL_CONFIG))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/courier/courier.toml` (system-wide)
/// 3. `~/.config/courier/courier.toml` (user XDG config)
/// 4. `./courier.toml` (local directory)
/// 5. `COURIER_*` environment variables
pub fn load_config() -> Result<CourierConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `COURIER_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys themselves
/// contain underscores: `COURIER_STORAGE_DATABASE_PATH` must become
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("COURIER_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("remote_", "remote.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
log_level = "debug"

[storage]
database_path = "/tmp/reports.db"
"#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.storage.database_path, "/tmp/reports.db");
        assert!(config.storage.wal_mode, "unset keys keep their defaults");
    }

    #[test]
    fn env_vars_override_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[remote]
timeout_secs = 5
"#,
            )?;
            jail.set_env("COURIER_REMOTE_TIMEOUT_SECS", "12");
            jail.set_env("COURIER_STORAGE_DATABASE_PATH", "/var/lib/courier/r.db");
            jail.set_env("COURIER_LOG_LEVEL", "warn");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.remote.timeout_secs, 12);
            assert_eq!(config.storage.database_path, "/var/lib/courier/r.db");
            assert_eq!(config.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG,
                r#"
[[agents]]
name = "weather"
url = "http://localhost:9000/"
"#,
            )?;
            let config = load_config()?;
            assert_eq!(config.agents.len(), 1);
            assert_eq!(config.agents[0].name, "weather");
            Ok(())
        });
    }
}
