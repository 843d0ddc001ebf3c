//! # Gangway - Charter Operations Console
//!
//! The main binary for the Gangway deterministic operations core.
//!
//! This application provides:
//! - CLI interface for board, portal, and pipeline operations
//! - JSON seed file handling
//! - Structured logging of committed pipeline moves
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                apps/gangway (THE BINARY)               │
//! │                                                        │
//! │  ┌─────────────┐   ┌──────────────┐   ┌────────────┐  │
//! │  │   CLI       │   │  Seed files  │   │  Tracing   │  │
//! │  │  (clap)     │   │  (JSON I/O)  │   │  sink      │  │
//! │  └──────┬──────┘   └──────┬───────┘   └─────┬──────┘  │
//! │         │                 │                 │          │
//! │         └─────────────────┼─────────────────┘          │
//! │                           ▼                            │
//! │                  ┌────────────────┐                    │
//! │                  │  gangway-core  │                    │
//! │                  │  (THE LOGIC)   │                    │
//! │                  └────────────────┘                    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Create the demo seed file
//! gangway init
//!
//! # Inspect the pipeline
//! gangway board
//! gangway move --deal D-1001 --to qualified --write
//! gangway portal --role staff --user u-astrid
//! ```

mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — GANGWAY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GANGWAY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // --verbose raises the default level; RUST_LOG still wins when set.
    let default_filter = if cli.verbose {
        "gangway=debug"
    } else {
        "gangway=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Gangway startup banner.
fn print_banner() {
    println!(
        r#"
   ██████╗  █████╗ ███╗   ██╗ ██████╗ ██╗    ██╗ █████╗ ██╗   ██╗
  ██╔════╝ ██╔══██╗████╗  ██║██╔════╝ ██║    ██║██╔══██╗╚██╗ ██╔╝
  ██║  ███╗███████║██╔██╗ ██║██║  ███╗██║ █╗ ██║███████║ ╚████╔╝
  ██║   ██║██╔══██║██║╚██╗██║██║   ██║██║███╗██║██╔══██║  ╚██╔╝
  ╚██████╔╝██║  ██║██║ ╚████║╚██████╔╝╚███╔███╔╝██║  ██║   ██║
   ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝ ╚═════╝  ╚══╝╚══╝ ╚═╝  ╚═╝   ╚═╝

  Charter Operations Console v{}

  Deterministic • Recoverable • Observable
"#,
        env!("CARGO_PKG_VERSION")
    );
}
