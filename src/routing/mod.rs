//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! proxy table (validated config)
//!     -> table.rs (compile: order prefixes longest-first)
//!     -> match_path (anchored prefix comparison)
//!     -> Return: RouteMatch (rule + rewrite) or None (served locally)
//! ```
//!
//! # Design Decisions
//! - Table compiled once at load time, immutable afterwards
//! - No regex in the lookup (literal prefix matching only)
//! - Deterministic: same path always resolves to the same rule
//! - Longest prefix wins, so nested prefixes never shadow each other

pub mod table;

pub use table::{RouteMatch, RouteTable};
