// SPDX-License-Identifier: MIT
//! Service configuration.
//!
//! Priority (highest to lowest): CLI / env var > `{data_dir}/config.toml`
//! > built-in default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 4700;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Observability knobs (`[observability]` in config.toml).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log SQLite queries that exceed this threshold (milliseconds).
    /// Set to 0 to disable slow query logging. Default: 100.
    pub slow_query_threshold_ms: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { slow_query_threshold_ms: 100 }
    }
}

/// `{data_dir}/config.toml` — all fields are optional overrides.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 4700).
    port: Option<u16>,
    /// Log level filter string, e.g. "debug", "info,selahd=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default) | "json".
    log_format: Option<String>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" behind a load balancer).
    bind_address: Option<String>,
    /// How many "almost there" achievements `GET /streaks/me` returns (default: 3).
    next_achievements_limit: Option<usize>,
    /// Observability configuration (`[observability]`).
    observability: Option<ObservabilityConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub log: String,
    pub log_format: String,
    pub bind_address: String,
    pub next_achievements_limit: usize,
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Build config from CLI/env args + optional TOML file.
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let log_format = std::env::var("SELAHD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());
        let bind_address = bind_address
            .or(std::env::var("SELAHD_BIND").ok().filter(|s| !s.is_empty()))
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);
        let next_achievements_limit = toml.next_achievements_limit.unwrap_or(3);
        let observability = toml.observability.unwrap_or_default();

        Self {
            port,
            data_dir,
            log,
            log_format,
            bind_address,
            next_achievements_limit,
            observability,
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("selahd");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("selahd");
    }
    PathBuf::from(".selahd")
}
