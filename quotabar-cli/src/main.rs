// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! QuotaBar - Codex and Antigravity quota in the macOS menu bar.
//!
//! Runs once per SwiftBar refresh: lists the credentials stored in a
//! CLIProxyAPI management server, asks each provider for its quota through
//! the server's request relay, and prints a SwiftBar menu.
//!
//! # Examples
//!
//! ```bash
//! # SwiftBar menu (default)
//! quotabar
//!
//! # Only Antigravity accounts
//! quotabar --provider antigravity
//!
//! # JSON output
//! quotabar --format json --pretty
//!
//! # Explicit env file
//! quotabar --env-file ~/.config/quotabar/.env
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quotabar_core::ProviderKind;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// QuotaBar - provider quota for SwiftBar.
#[derive(Parser)]
#[command(name = "quotabar")]
#[command(about = "Codex and Antigravity quota for SwiftBar")]
#[command(long_about = r#"
QuotaBar reads Codex and Antigravity quota through a CLIProxyAPI
management server and prints a SwiftBar menu.

Configuration (environment, or a key=value env file):
  CPA_BASE_URL         Management server base URL (required)
  CPA_MANAGEMENT_KEY   Management key (required)
  CPA_TIMEOUT_SECS     Request timeout in seconds (default 15)

Examples:
  quotabar                          # SwiftBar menu
  quotabar --provider codex         # Codex accounts only
  quotabar --format json --pretty   # JSON output
"#)]
#[command(version)]
pub struct Cli {
    /// Output format.
    #[arg(long, short = 'f', default_value = "swiftbar")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Providers to query; comma-separated. Defaults to all.
    #[arg(long, short, value_delimiter = ',')]
    pub provider: Vec<ProviderArg>,

    /// Env file to read configuration from.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Verbose logging to stderr.
    #[arg(long, short)]
    pub verbose: bool,

    /// No logging at all.
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the selected provider kinds; empty means all.
    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.provider.iter().map(|p| ProviderKind::from(*p)).collect()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// SwiftBar menu lines.
    #[default]
    Swiftbar,
    /// JSON output for scripting.
    Json,
}

/// Provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Codex accounts.
    Codex,
    /// Antigravity accounts.
    Antigravity,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Codex => ProviderKind::Codex,
            ProviderArg::Antigravity => ProviderKind::Antigravity,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let default = if verbose {
        "quotabar=debug,info"
    } else {
        "quotabar=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout belongs to SwiftBar
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Failures are part of the rendered output; the exit code stays 0.
    if let Err(e) = commands::quota::run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
    }
}
