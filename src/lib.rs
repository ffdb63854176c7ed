//! Dev server configuration front-end.
//!
//! Loads, validates, and hands over the static configuration a frontend
//! dev-server runtime consumes at startup: framework plugins, the network
//! binding (host, port, allowed hostnames), and the proxy table forwarding
//! `/api` traffic to the backend service. The runtime does the serving; this
//! crate only produces the configuration object.

pub mod config;
pub mod routing;

pub use config::loader::{
    load_config, resolve_config, ConfigError, ConfigSource, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE,
};
pub use config::schema::{DevServerConfig, PathRewrite, ProxyRule, ServerBinding, ServerConfig};
pub use config::validation::{validate_config, ValidationError};
pub use routing::{RouteMatch, RouteTable};
