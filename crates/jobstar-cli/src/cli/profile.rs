//! Profile CLI subcommands backed by the local identity registry.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use jobstar_types::profile::{Address, ProfileId};

use crate::state::AppState;

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Mint a new profile.
    Mint {
        /// Unique human-readable handle.
        handle: String,

        /// Address that will own the profile.
        #[arg(long)]
        owner: Address,
    },

    /// Transfer a profile to a new owner.
    Transfer {
        /// Profile id.
        id: ProfileId,

        /// Current owner.
        #[arg(long)]
        from: Address,

        /// New owner.
        #[arg(long)]
        to: Address,
    },

    /// Show a profile.
    Show {
        /// Profile id.
        id: ProfileId,
    },
}

/// Handle a profile subcommand.
pub async fn handle_profile_command(cmd: ProfileCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        ProfileCommand::Mint { handle, owner } => mint(state, &handle, owner, json).await,
        ProfileCommand::Transfer { id, from, to } => transfer(state, id, &from, to, json).await,
        ProfileCommand::Show { id } => show(state, id, json).await,
    }
}

async fn mint(state: &AppState, handle: &str, owner: Address, json: bool) -> Result<()> {
    let id = state
        .profiles
        .mint(handle, owner.clone())
        .await
        .with_context(|| format!("Failed to mint profile '{handle}'"))?;

    if json {
        let result = serde_json::json!({
            "id": id,
            "handle": handle.trim(),
            "owner": owner,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Minted profile {} '{}' owned by {}",
            style("ok").green(),
            style(id).bold(),
            style(handle.trim()).cyan(),
            style(&owner).dim(),
        );
        println!();
    }

    Ok(())
}

async fn transfer(
    state: &AppState,
    id: ProfileId,
    from: &Address,
    to: Address,
    json: bool,
) -> Result<()> {
    state
        .profiles
        .transfer(id, from, to.clone())
        .await
        .with_context(|| format!("Failed to transfer profile {id}"))?;

    if json {
        let result = serde_json::json!({
            "id": id,
            "from": from,
            "to": to,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Profile {} now owned by {}",
            style("ok").green(),
            style(id).bold(),
            style(&to).cyan(),
        );
        println!();
    }

    Ok(())
}

async fn show(state: &AppState, id: ProfileId, json: bool) -> Result<()> {
    let profile = state
        .profiles
        .profile(id)
        .await?
        .with_context(|| format!("Profile {id} not found"))?;
    let skills = state.skills.get_skills(id).await?;

    if json {
        let result = serde_json::json!({
            "profile": profile,
            "skills": skills,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(format!("#{}", profile.id)).bold(),
        style(&profile.handle).cyan().bold()
    );
    println!("  Owner:  {}", profile.owner);
    if skills.is_empty() {
        println!("  Skills: {}", style("none").dim());
    } else {
        println!("  Skills: {}", skills.join(", "));
    }
    println!();

    Ok(())
}
