//! Configuration management for the help-desk server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to their default.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Store configuration
    pub store: StoreSettings,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
    /// Load demo users and tickets at startup
    pub seed_demo_data: bool,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Size of the fixed worker pool
    pub worker_threads: usize,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Action broadcast buffer
    pub broadcast_capacity: usize,
    /// Maximum wait for a command reply, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let worker_threads = parse_or(&lookup, "WORKER_THREADS", 10_usize);

        Self {
            server: ServerConfig {
                host: lookup("HOST")
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", 8080),
                worker_threads: if worker_threads == 0 { 10 } else { worker_threads },
                log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
                shutdown_timeout: parse_or(&lookup, "SHUTDOWN_TIMEOUT", 30),
            },
            store: StoreSettings {
                broadcast_capacity: parse_or(&lookup, "STORE_BROADCAST_CAPACITY", 256),
                request_timeout_ms: parse_or(&lookup, "REQUEST_TIMEOUT_MS", 5000),
            },
            metrics_enabled: flag_or(&lookup, "METRICS_ENABLED", true),
            seed_demo_data: flag_or(&lookup, "SEED_DEMO_DATA", true),
        }
    }

    /// `host:port` to bind the HTTP listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }

    /// Maximum wait for a command reply.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.store.request_timeout_ms)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn flag_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1" | "yes" | "on") => true,
        Some("false" | "0" | "no" | "off") => false,
        _ => default,
    }
}
