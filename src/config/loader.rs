//! Configuration loading from disk.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::DevServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file, checked after `--config`.
pub const CONFIG_ENV_VAR: &str = "DEVSERVER_CONFIG";

/// File picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "devserver.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file found; the compiled-in deployment defaults are in effect.
    BuiltIn,
    /// Loaded from this file.
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::BuiltIn => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DevServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DevServerConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        path = %path.display(),
        host = %config.server.binding.host,
        port = config.server.binding.port,
        rules = config.server.proxy.len(),
        "configuration file loaded"
    );
    Ok(config)
}

/// Resolve the active configuration.
///
/// Sources are tried in order: the explicit path (required to exist once
/// named), the `DEVSERVER_CONFIG` environment variable, `devserver.toml` in
/// the working directory, and finally the compiled-in defaults. The defaults
/// are literals and cannot fail.
pub fn resolve_config(
    explicit: Option<&Path>,
) -> Result<(DevServerConfig, ConfigSource), ConfigError> {
    if let Some(path) = explicit {
        let config = load_config(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    if let Some(path) = env::var(CONFIG_ENV_VAR).ok().filter(|v| !v.is_empty()) {
        let path = PathBuf::from(path);
        let config = load_config(&path)?;
        return Ok((config, ConfigSource::File(path)));
    }

    let cwd_default = Path::new(DEFAULT_CONFIG_FILE);
    if cwd_default.exists() {
        let config = load_config(cwd_default)?;
        return Ok((config, ConfigSource::File(cwd_default.to_path_buf())));
    }

    let config = DevServerConfig::default();
    tracing::info!(
        host = %config.server.binding.host,
        port = config.server.binding.port,
        "no configuration file found, using built-in defaults"
    );
    Ok((config, ConfigSource::BuiltIn))
}
