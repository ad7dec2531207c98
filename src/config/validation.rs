//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that required paths are non-empty
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: PanelConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::PanelConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// A required path or name option is empty.
    EmptyField(&'static str),
    /// An address option does not parse as host:port.
    InvalidAddress { field: &'static str, value: String },
    /// A timeout option is zero.
    ZeroTimeout(&'static str),
    /// The bootstrap password hash is set but is not a bcrypt hash.
    BadPasswordHash,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} must not be empty", field),
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid address: {}", field, value)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::BadPasswordHash => {
                write!(f, "panel.bootstrap_password_hash is not a bcrypt hash")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &PanelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("nginx.available_dir", &config.nginx.available_dir),
        ("nginx.enabled_dir", &config.nginx.enabled_dir),
        ("nginx.config_root", &config.nginx.config_root),
        ("nginx.binary_path", &config.nginx.binary_path),
        ("panel.data_dir", &config.panel.data_dir),
        ("panel.session_cookie", &config.panel.session_cookie),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField(field));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let timeouts = [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.validate_secs", config.timeouts.validate_secs),
        ("timeouts.backup_secs", config.timeouts.backup_secs),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    let hash = &config.panel.bootstrap_password_hash;
    if !hash.is_empty() && !hash.starts_with("$2") {
        errors.push(ValidationError::BadPasswordHash);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
