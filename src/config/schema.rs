//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the panel.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the panel.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Locations and invocation details of the managed nginx install.
    pub nginx: NginxConfig,

    /// Panel-owned state: data directory, static assets, sessions.
    pub panel: PanelOptions,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5005").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5005".to_string(),
        }
    }
}

/// Paths and switches for the managed nginx installation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NginxConfig {
    /// Directory holding every site's config file.
    pub available_dir: String,

    /// Parallel symlink farm consumed by nginx on reload.
    pub enabled_dir: String,

    /// Root of the nginx configuration tree, archived by backups.
    pub config_root: String,

    /// Path to the nginx binary used for `-t` and `-s reload`.
    pub binary_path: String,

    /// Reload through the service manager instead of signaling nginx
    /// directly.
    pub use_systemctl: bool,

    /// Access log tailed by the logs endpoint.
    pub access_log: String,

    /// Error log tailed by the logs endpoint.
    pub error_log: String,
}

impl Default for NginxConfig {
    fn default() -> Self {
        Self {
            available_dir: "/etc/nginx/sites-available".to_string(),
            enabled_dir: "/etc/nginx/sites-enabled".to_string(),
            config_root: "/etc/nginx".to_string(),
            binary_path: "/usr/sbin/nginx".to_string(),
            use_systemctl: false,
            access_log: "/var/log/nginx/access.log".to_string(),
            error_log: "/var/log/nginx/error.log".to_string(),
        }
    }
}

/// Panel-owned state and session settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Directory for users.json, templates.json, history/ and backups/.
    pub data_dir: String,

    /// Directory of static UI assets served under /static.
    pub static_dir: String,

    /// Name of the session cookie.
    pub session_cookie: String,

    /// Username seeded into users.json on first login when no users exist.
    pub bootstrap_username: String,

    /// Bcrypt hash for the bootstrap user. Empty disables bootstrapping.
    pub bootstrap_password_hash: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            static_dir: "./static".to_string(),
            session_cookie: "nginx_panel_sid".to_string(),
            bootstrap_username: "admin".to_string(),
            bootstrap_password_hash: String::new(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Wall-clock limit for `nginx -t`, reload and log tailing.
    pub validate_secs: u64,

    /// Wall-clock limit for archive creation.
    pub backup_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 60,
            validate_secs: 15,
            backup_secs: 300,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
