//! CLI command definitions for the `jobstar` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! noun (`jobstar profile mint`, `jobstar achievement accept`).

pub mod achievement;
pub mod events;
pub mod profile;
pub mod skills;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use jobstar_infra::config::DATA_DIR_ENV;

/// Record and confirm skill-verified work achievements.
#[derive(Parser)]
#[command(name = "jobstar", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding config.toml and the ledger database.
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage profiles in the local identity registry (mint, transfer, show).
    Profile {
        #[command(subcommand)]
        action: profile::ProfileCommand,
    },

    /// Read or replace a profile's skill list.
    Skills {
        #[command(subcommand)]
        action: skills::SkillsCommand,
    },

    /// Propose, accept, and query achievements.
    #[command(alias = "ach")]
    Achievement {
        #[command(subcommand)]
        action: achievement::AchievementCommand,
    },

    /// List journaled ledger events in commit order.
    Events {
        /// Only show events of this kind.
        #[arg(long, value_enum)]
        kind: Option<events::EventFilter>,
    },

    /// Ledger status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
