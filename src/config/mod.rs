//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! devserver.toml (optional)
//!     -> loader.rs (resolve source, parse & deserialize)
//!     -> validation.rs (semantic checks, all errors collected)
//!     -> DevServerConfig (validated, immutable)
//!     -> handed to the dev-server runtime, read-only for the process life
//! ```
//!
//! # Design Decisions
//! - Config is loaded exactly once; there is no reload path
//! - All fields have defaults, so an absent file and an empty file both
//!   yield the deployment literal
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, ConfigSource};
pub use schema::{DevServerConfig, PathRewrite, ProxyRule, ServerBinding, ServerConfig};
pub use validation::{validate_config, ValidationError};
