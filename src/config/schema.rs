//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure handed to the
//! dev-server runtime. All types derive Serde traits; field names follow the
//! runtime's camelCase contract so the TOML file and the JSON handoff
//! document share one schema.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Root configuration for the dev server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Framework plugins, by name. Resolved by the runtime, opaque here.
    pub plugins: Vec<String>,

    /// Network binding and proxy table.
    pub server: ServerConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            plugins: vec!["vue".to_string()],
            server: ServerConfig::default(),
        }
    }
}

impl DevServerConfig {
    /// Render the handoff document in exactly the field layout the runtime
    /// consumes: `plugins`, `server.proxy`, `server.host`, `server.port`,
    /// `server.allowedHosts`.
    pub fn to_runtime_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The `server` section: where the dev server binds, and which request
/// prefixes it forwards instead of serving itself.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address and reachable hostnames.
    #[serde(flatten, default)]
    pub binding: ServerBinding,

    /// Proxy table mapping a path prefix to a forwarding rule.
    #[serde(default = "default_proxy")]
    pub proxy: BTreeMap<String, ProxyRule>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binding: ServerBinding::default(),
            proxy: default_proxy(),
        }
    }
}

fn default_proxy() -> BTreeMap<String, ProxyRule> {
    let mut proxy = BTreeMap::new();
    proxy.insert(
        "/api".to_string(),
        ProxyRule {
            target: "http://backend:5000".to_string(),
            change_origin: true,
            ws: true,
            rewrite: Some(PathRewrite {
                strip_prefix: "/api".to_string(),
            }),
        },
    );
    proxy
}

/// Network binding options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerBinding {
    /// Interface the dev server listens on.
    pub host: String,

    /// Listen port (1-65535).
    pub port: u16,

    /// Hostnames the server may be reached under. Requests carrying any
    /// other Host header are rejected by the runtime.
    pub allowed_hosts: BTreeSet<String>,
}

impl Default for ServerBinding {
    fn default() -> Self {
        Self {
            // Listen on all interfaces so the container network can reach us.
            host: "0.0.0.0".to_string(),
            port: 5173,
            allowed_hosts: ["localhost", "172.18.0.4", "127.0.0.1"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }
}

/// A single forwarding rule. Requests whose path starts with the rule's
/// prefix (the proxy table key) are sent to `target` instead of being
/// served locally.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRule {
    /// Base URL of the backend receiving forwarded requests.
    pub target: String,

    /// Rewrite the Host header to match `target`.
    #[serde(default)]
    pub change_origin: bool,

    /// Forward WebSocket upgrades on this prefix as well.
    #[serde(default)]
    pub ws: bool,

    /// Optional path transformation applied before forwarding. Absent means
    /// the path is passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<PathRewrite>,
}

/// Declarative path rewrite: remove a leading prefix, nothing else.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRewrite {
    /// Prefix removed from the path when it occurs at position 0.
    pub strip_prefix: String,
}

impl PathRewrite {
    /// Apply the rewrite. Total over all input strings: paths that do not
    /// start with the prefix come back unchanged, and a path equal to the
    /// prefix maps to the empty string.
    pub fn apply(&self, path: &str) -> String {
        match path.strip_prefix(&self.strip_prefix) {
            Some(rest) => rest.to_string(),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_rewrite() -> PathRewrite {
        PathRewrite {
            strip_prefix: "/api".to_string(),
        }
    }

    #[test]
    fn rewrite_strips_anchored_prefix() {
        let rewrite = api_rewrite();
        assert_eq!(rewrite.apply("/api/users/1"), "/users/1");
        assert_eq!(rewrite.apply("/api"), "");
        // Anchored string match, not segment-aware.
        assert_eq!(rewrite.apply("/apikeys"), "keys");
    }

    #[test]
    fn rewrite_passes_through_non_matching_paths() {
        let rewrite = api_rewrite();
        assert_eq!(rewrite.apply("/health"), "/health");
        assert_eq!(rewrite.apply("/v1/api/users"), "/v1/api/users");
        assert_eq!(rewrite.apply(""), "");
    }

    #[test]
    fn defaults_match_deployment_literal() {
        let config = DevServerConfig::default();

        assert_eq!(config.plugins, vec!["vue".to_string()]);
        assert_eq!(config.server.binding.host, "0.0.0.0");
        assert_eq!(config.server.binding.port, 5173);

        let expected_hosts: BTreeSet<String> = ["localhost", "172.18.0.4", "127.0.0.1"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(config.server.binding.allowed_hosts, expected_hosts);

        let rule = config.server.proxy.get("/api").expect("default /api rule");
        assert_eq!(rule.target, "http://backend:5000");
        assert!(rule.change_origin);
        assert!(rule.ws);
        assert_eq!(
            rule.rewrite.as_ref().map(|r| r.strip_prefix.as_str()),
            Some("/api")
        );
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: DevServerConfig = toml::from_str("").unwrap();
        assert_eq!(config, DevServerConfig::default());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let toml_src = r#"
[server]
port = 4000
"#;
        let config: DevServerConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.server.binding.port, 4000);
        assert_eq!(config.server.binding.host, "0.0.0.0");
        assert_eq!(config.plugins, vec!["vue".to_string()]);
        // Omitted sections keep the deployment defaults, proxy included.
        assert!(config.server.proxy.contains_key("/api"));
    }

    #[test]
    fn parse_full_config() {
        let toml_src = r#"
plugins = ["vue"]

[server]
host = "127.0.0.1"
port = 8080
allowedHosts = ["localhost"]

[server.proxy."/api"]
target = "http://127.0.0.1:9000"
changeOrigin = true
ws = false
rewrite = { stripPrefix = "/api" }

[server.proxy."/ws"]
target = "http://127.0.0.1:9001"
ws = true
"#;
        let config: DevServerConfig = toml::from_str(toml_src).unwrap();

        assert_eq!(config.server.binding.port, 8080);
        assert_eq!(config.server.proxy.len(), 2);

        let api = &config.server.proxy["/api"];
        assert_eq!(api.target, "http://127.0.0.1:9000");
        assert!(api.change_origin);
        assert!(!api.ws);

        let ws = &config.server.proxy["/ws"];
        assert!(ws.ws);
        // Flags omitted in the file fall back to off.
        assert!(!ws.change_origin);
        assert!(ws.rewrite.is_none());
    }

    #[test]
    fn serialization_uses_runtime_field_names() {
        let rendered = toml::to_string_pretty(&DevServerConfig::default()).unwrap();
        assert!(rendered.contains("allowedHosts"));
        assert!(rendered.contains("changeOrigin"));
        assert!(rendered.contains("stripPrefix"));
        assert!(!rendered.contains("allowed_hosts"));
    }

    #[test]
    fn runtime_json_has_handoff_layout() {
        let json = DevServerConfig::default().to_runtime_json().unwrap();

        assert_eq!(json["plugins"][0], "vue");
        assert_eq!(json["server"]["host"], "0.0.0.0");
        assert_eq!(json["server"]["port"], 5173);
        assert_eq!(json["server"]["allowedHosts"].as_array().unwrap().len(), 3);
        assert_eq!(
            json["server"]["proxy"]["/api"]["target"],
            "http://backend:5000"
        );
        assert_eq!(json["server"]["proxy"]["/api"]["changeOrigin"], true);
        assert_eq!(json["server"]["proxy"]["/api"]["ws"], true);
        assert_eq!(
            json["server"]["proxy"]["/api"]["rewrite"]["stripPrefix"],
            "/api"
        );
    }
}
