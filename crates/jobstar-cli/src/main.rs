//! JobStar CLI entry point.
//!
//! Binary name: `jobstar`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use jobstar_infra::config::{load_ledger_config, resolve_data_dir};
use jobstar_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "jobstar", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir(cli.data_dir.clone());
    let config = load_ledger_config(&data_dir).await;

    init_tracing(&TracingOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        json: config.logging.json,
        otel: config.logging.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, data_dir, config).await;

    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: std::path::PathBuf,
    config: jobstar_types::config::LedgerConfig,
) -> anyhow::Result<()> {
    // Initialize application state (DB, services)
    let state = AppState::init(data_dir, config).await?;

    match cli.command {
        Commands::Profile { action } => {
            cli::profile::handle_profile_command(action, &state, cli.json).await?;
        }

        Commands::Skills { action } => {
            cli::skills::handle_skills_command(action, &state, cli.json).await?;
        }

        Commands::Achievement { action } => {
            cli::achievement::handle_achievement_command(action, &state, cli.json).await?;
        }

        Commands::Events { kind } => {
            cli::events::list_events(&state, kind, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
