//! Dev server configuration CLI.
//!
//! Front-end for the configuration consumed by the frontend dev-server
//! runtime. The runtime serves assets and runs the proxy; this binary owns
//! everything that happens to the configuration before that handoff.
//!
//! ```text
//!  devserver.toml ──► loader ──► validation ──► DevServerConfig
//!                                                    │
//!        check ◄── findings report ◄─────────────────┤
//!        show  ◄── resolved TOML / handoff JSON ◄────┤
//!        route ◄── proxy table lookup ◄──────────────┘
//!        init  ──► writes the default devserver.toml
//! ```
//!
//! Exit code is 0 when the requested operation succeeds and the
//! configuration is sound, 1 otherwise.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devserver_config::{
    resolve_config, ConfigError, DevServerConfig, RouteTable, DEFAULT_CONFIG_FILE,
};

#[derive(Parser)]
#[command(name = "devserver-config")]
#[command(version, about = "Load, validate, and inspect the dev server configuration")]
struct Cli {
    /// Path to the config file (overrides DEVSERVER_CONFIG and ./devserver.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and report every finding
    Check {
        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        output: ReportFormat,
    },
    /// Print the resolved configuration
    Show {
        /// File form (toml) or the runtime handoff document (json)
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Toml)]
        format: ShowFormat,
    },
    /// Write the default devserver.toml
    Init {
        /// Destination file (defaults to ./devserver.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Resolve a request path against the proxy table
    Route {
        /// Request path, e.g. /api/users/1
        path: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    Toml,
    Json,
}

/// Machine-readable `check` result.
#[derive(Serialize)]
struct CheckReport {
    ok: bool,
    source: Option<String>,
    errors: Vec<String>,
}

fn main() {
    // Quiet by default; RUST_LOG=devserver_config=debug turns on load tracing.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devserver_config=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config_arg = cli.config.as_deref();
    match cli.command {
        Commands::Check { output } => check(config_arg, output),
        Commands::Show { format } => show(config_arg, format),
        Commands::Init { path, force } => init(path, force),
        Commands::Route { path } => route(config_arg, &path),
    }
}

fn check(
    config_arg: Option<&Path>,
    output: ReportFormat,
) -> Result<i32, Box<dyn std::error::Error>> {
    let (report, code) = match resolve_config(config_arg) {
        Ok((config, source)) => {
            let table = RouteTable::from_config(&config);
            if output == ReportFormat::Text {
                println!("configuration OK");
                println!("  source:      {source}");
                println!("  proxy rules: {}", table.len());
            }
            let report = CheckReport {
                ok: true,
                source: Some(source.to_string()),
                errors: Vec::new(),
            };
            (report, 0)
        }
        Err(ConfigError::Validation(errors)) => {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            if output == ReportFormat::Text {
                for message in &messages {
                    println!("error: {message}");
                }
                println!("{} error(s) found", messages.len());
            }
            let report = CheckReport {
                ok: false,
                source: None,
                errors: messages,
            };
            (report, 1)
        }
        Err(other) => {
            if output == ReportFormat::Text {
                println!("error: {other}");
            }
            let report = CheckReport {
                ok: false,
                source: None,
                errors: vec![other.to_string()],
            };
            (report, 1)
        }
    };

    if output == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(code)
}

fn show(
    config_arg: Option<&Path>,
    format: ShowFormat,
) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, source) = resolve_config(config_arg)?;
    tracing::debug!(%source, "printing resolved configuration");

    match format {
        ShowFormat::Toml => print!("{}", toml::to_string_pretty(&config)?),
        ShowFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.to_runtime_json()?)?)
        }
    }
    Ok(0)
}

fn init(path: Option<PathBuf>, force: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if path.exists() && !force {
        eprintln!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
        return Ok(1);
    }

    fs::write(&path, toml::to_string_pretty(&DevServerConfig::default())?)?;
    println!("wrote {}", path.display());
    Ok(0)
}

fn route(config_arg: Option<&Path>, path: &str) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, _) = resolve_config(config_arg)?;
    let table = RouteTable::from_config(&config);

    match table.resolve(path) {
        Some((matched, rewritten)) => {
            println!("path:      {path}");
            println!("prefix:    {}", matched.prefix);
            println!("target:    {}", matched.rule.target);
            println!("rewritten: {rewritten}");
            println!(
                "websocket: {}",
                if matched.rule.ws {
                    "forwarded"
                } else {
                    "not forwarded"
                }
            );
        }
        None => {
            println!("path:      {path}");
            println!("no proxy rule matches; the dev server serves this path itself");
        }
    }
    Ok(0)
}
