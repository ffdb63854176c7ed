//! Route lookup over the proxy table.
//!
//! # Responsibilities
//! - Compile the proxy table into an ordered lookup structure
//! - Match request paths against rule prefixes (anchored, case-sensitive)
//! - Apply the matched rule's rewrite
//!
//! # Design Decisions
//! - Built from a validated config, immutable afterwards
//! - Longest prefix checked first; file order does not matter
//! - O(rules) scan per lookup, fine for the handful of rules a dev setup has

use crate::config::schema::{DevServerConfig, ProxyRule};

/// Immutable, ordered view of the proxy table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(String, ProxyRule)>,
}

/// Outcome of a successful path lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The table key that anchored the path.
    pub prefix: &'a str,

    /// The forwarding rule stored under that key.
    pub rule: &'a ProxyRule,
}

impl RouteMatch<'_> {
    /// The path as the backend will see it: the rule's rewrite applied, or
    /// the original path when the rule carries none.
    pub fn rewritten(&self, path: &str) -> String {
        match &self.rule.rewrite {
            Some(rewrite) => rewrite.apply(path),
            None => path.to_string(),
        }
    }
}

impl RouteTable {
    /// Compile the lookup table. Entries are ordered by descending prefix
    /// length (lexicographic for equal lengths), so the most specific rule
    /// is always consulted first.
    pub fn from_config(config: &DevServerConfig) -> Self {
        let mut entries: Vec<(String, ProxyRule)> = config
            .server
            .proxy
            .iter()
            .map(|(prefix, rule)| (prefix.clone(), rule.clone()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    /// Find the rule that forwards `path`, if any. Paths matching no prefix
    /// are served by the dev server itself.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.entries
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(prefix, rule)| RouteMatch { prefix, rule })
    }

    /// Match and rewrite in one step: the rule forwarding `path` together
    /// with the path the backend will see.
    pub fn resolve(&self, path: &str) -> Option<(RouteMatch<'_>, String)> {
        self.match_path(path).map(|m| {
            let rewritten = m.rewritten(path);
            (m, rewritten)
        })
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PathRewrite;

    fn rule(target: &str) -> ProxyRule {
        ProxyRule {
            target: target.to_string(),
            change_origin: false,
            ws: false,
            rewrite: None,
        }
    }

    #[test]
    fn matches_configured_prefix_and_rewrites() {
        let table = RouteTable::from_config(&DevServerConfig::default());

        let m = table.match_path("/api/users/1").expect("should match /api");
        assert_eq!(m.prefix, "/api");
        assert_eq!(m.rule.target, "http://backend:5000");
        assert_eq!(m.rewritten("/api/users/1"), "/users/1");
    }

    #[test]
    fn unmatched_path_stays_local() {
        let table = RouteTable::from_config(&DevServerConfig::default());
        assert!(table.match_path("/health").is_none());
        assert!(table.match_path("/").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let mut config = DevServerConfig::default();
        config
            .server
            .proxy
            .insert("/api/v2".to_string(), rule("http://backend-v2:5001"));
        let table = RouteTable::from_config(&config);

        let m = table.match_path("/api/v2/users").unwrap();
        assert_eq!(m.prefix, "/api/v2");
        assert_eq!(m.rule.target, "http://backend-v2:5001");

        let m = table.match_path("/api/users").unwrap();
        assert_eq!(m.prefix, "/api");
    }

    #[test]
    fn resolve_pairs_rule_with_rewritten_path() {
        let table = RouteTable::from_config(&DevServerConfig::default());

        let (m, rewritten) = table.resolve("/api/users/1").unwrap();
        assert_eq!(m.prefix, "/api");
        assert_eq!(rewritten, "/users/1");

        assert!(table.resolve("/health").is_none());
    }

    #[test]
    fn missing_rewrite_passes_path_through() {
        let mut config = DevServerConfig::default();
        config
            .server
            .proxy
            .insert("/raw".to_string(), rule("http://backend:5000"));
        let table = RouteTable::from_config(&config);

        let m = table.match_path("/raw/file.txt").unwrap();
        assert_eq!(m.rewritten("/raw/file.txt"), "/raw/file.txt");
    }

    #[test]
    fn rewrite_can_differ_from_match_prefix() {
        let mut config = DevServerConfig::default();
        let mut r = rule("http://backend:5000");
        r.rewrite = Some(PathRewrite {
            strip_prefix: "/internal".to_string(),
        });
        config.server.proxy.insert("/internal/api".to_string(), r);
        let table = RouteTable::from_config(&config);

        let m = table.match_path("/internal/api/users").unwrap();
        assert_eq!(m.prefix, "/internal/api");
        assert_eq!(m.rewritten("/internal/api/users"), "/api/users");
    }

    #[test]
    fn empty_table_matches_nothing() {
        let mut config = DevServerConfig::default();
        config.server.proxy.clear();
        let table = RouteTable::from_config(&config);

        assert!(table.is_empty());
        assert!(table.match_path("/api/users").is_none());
    }
}
