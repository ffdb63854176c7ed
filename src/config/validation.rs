//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port nonzero) and shapes (prefixes, URLs)
//! - Check every proxy rule independently
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: DevServerConfig -> Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system
//! - Each error names its config location so reports read like the file

use thiserror::Error;
use url::Url;

use crate::config::schema::DevServerConfig;

/// A single semantic violation, addressed by its location in the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.port: port 0 is not bindable, expected 1-65535")]
    PortZero,

    #[error("server.host: host must not be empty")]
    EmptyHost,

    #[error("server.allowedHosts: at least one hostname is required")]
    NoAllowedHosts,

    #[error("server.proxy[{prefix:?}]: prefix must start with '/'")]
    InvalidPrefix { prefix: String },

    #[error("server.proxy[{prefix:?}].target: {reason} ({target:?})")]
    InvalidTarget {
        prefix: String,
        target: String,
        reason: String,
    },

    #[error("server.proxy[{prefix:?}].rewrite.stripPrefix: must start with '/' ({strip_prefix:?})")]
    InvalidRewrite {
        prefix: String,
        strip_prefix: String,
    },

    #[error("plugins[{index}]: plugin name must not be empty")]
    EmptyPluginName { index: usize },
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &DevServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.binding.port == 0 {
        errors.push(ValidationError::PortZero);
    }

    if config.server.binding.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.server.binding.allowed_hosts.is_empty() {
        errors.push(ValidationError::NoAllowedHosts);
    }

    for (index, plugin) in config.plugins.iter().enumerate() {
        if plugin.trim().is_empty() {
            errors.push(ValidationError::EmptyPluginName { index });
        }
    }

    for (prefix, rule) in &config.server.proxy {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix {
                prefix: prefix.clone(),
            });
        }

        if let Err(reason) = check_target(&rule.target) {
            errors.push(ValidationError::InvalidTarget {
                prefix: prefix.clone(),
                target: rule.target.clone(),
                reason,
            });
        }

        if let Some(rewrite) = &rule.rewrite {
            if !rewrite.strip_prefix.starts_with('/') {
                errors.push(ValidationError::InvalidRewrite {
                    prefix: prefix.clone(),
                    strip_prefix: rewrite.strip_prefix.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A target must be an absolute http(s) URL with a host, e.g.
/// `http://backend:5000`.
fn check_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{other}', expected http or https")),
    }

    if url.host_str().is_none() {
        return Err("URL has no host".to_string());
    }

    Ok(())
}
