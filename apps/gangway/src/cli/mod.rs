//! # Gangway CLI Module
//!
//! This module implements the CLI interface for Gangway.
//!
//! ## Available Commands
//!
//! - `board` - Show the pipeline board with per-stage aggregates
//! - `move` - Move a deal to a target stage
//! - `portal` - Resolve the portal for a role and user
//! - `filter` - List deals matching a search/priority filter
//! - `stages` - Show static stage metadata
//! - `init` - Write the example seed file

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use gangway_core::GangwayError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Gangway - Charter Operations Console
///
/// A minimal, deterministic operations core for a charter fleet.
/// The pipeline holds only the deals the desk has seeded into it.
#[derive(Parser, Debug)]
#[command(name = "gangway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the pipeline seed file (JSON)
    #[arg(short = 'S', long, global = true)]
    pub seed: Option<PathBuf>,

    /// Path to an app config file (TOML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the pipeline board
    Board,

    /// Move a deal to a target stage
    Move {
        /// Deal id to move
        #[arg(short, long)]
        deal: String,

        /// Target stage (new, qualified, offer, prepaid, completed)
        #[arg(short, long)]
        to: String,

        /// Write the updated snapshot back to the seed file
        #[arg(short, long)]
        write: bool,
    },

    /// Resolve the portal for a role
    Portal {
        /// Role (vip-client, standard-client, business-client,
        /// brand-partner, agent-partner, contractor, staff, admin)
        #[arg(short, long)]
        role: String,

        /// Seeded user id supplying the permission set
        #[arg(short, long)]
        user: Option<String>,

        /// Ad-hoc permission grants (comma-separated), used when no
        /// seeded user is given
        #[arg(short, long)]
        grant: Option<String>,
    },

    /// List deals matching a filter
    Filter {
        /// Case-insensitive search over title, client, and owner
        #[arg(short, long)]
        search: Option<String>,

        /// Priority (low, medium, high, urgent; "all" disables)
        #[arg(short, long, default_value = "all")]
        priority: String,
    },

    /// Show static stage metadata
    Stages,

    /// Write the example seed file
    Init {
        /// Overwrite an existing seed file
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GangwayError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let seed_path = cli
        .seed
        .or(config.seed)
        .unwrap_or_else(|| PathBuf::from("gangway.json"));
    let json_mode = cli.json_mode || config.json_mode.unwrap_or(false);

    match cli.command {
        Some(Commands::Board) => cmd_board(&seed_path, json_mode),
        Some(Commands::Move { deal, to, write }) => {
            cmd_move(&seed_path, json_mode, &deal, &to, write)
        }
        Some(Commands::Portal { role, user, grant }) => cmd_portal(
            &seed_path,
            json_mode,
            &role,
            user.as_deref(),
            grant.as_deref(),
        ),
        Some(Commands::Filter { search, priority }) => {
            cmd_filter(&seed_path, json_mode, search.as_deref(), &priority)
        }
        Some(Commands::Stages) => cmd_stages(json_mode),
        Some(Commands::Init { force }) => cmd_init(&seed_path, force),
        None => {
            // No subcommand - show the board by default
            cmd_board(&seed_path, json_mode)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_command() {
        let cli = Cli::try_parse_from([
            "gangway", "move", "--deal", "D-1001", "--to", "qualified", "--write",
        ])
        .expect("parse");

        match cli.command {
            Some(Commands::Move { deal, to, write }) => {
                assert_eq!(deal, "D-1001");
                assert_eq!(to, "qualified");
                assert!(write);
            }
            _ => unreachable!("expected move"),
        }
    }

    #[test]
    fn parses_global_flags_anywhere() {
        let cli = Cli::try_parse_from([
            "gangway",
            "portal",
            "--role",
            "staff",
            "--json-mode",
            "--seed",
            "fleet.json",
        ])
        .expect("parse");

        assert!(cli.json_mode);
        assert_eq!(cli.seed, Some(PathBuf::from("fleet.json")));
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["gangway"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn filter_priority_defaults_to_all() {
        let cli = Cli::try_parse_from(["gangway", "filter", "--search", "heli"]).expect("parse");
        match cli.command {
            Some(Commands::Filter { priority, .. }) => assert_eq!(priority, "all"),
            _ => unreachable!("expected filter"),
        }
    }
}
