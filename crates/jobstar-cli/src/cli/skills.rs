//! Skill CLI subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use jobstar_types::profile::{Address, ProfileId};

use crate::state::AppState;

/// Skill subcommands.
#[derive(Subcommand)]
pub enum SkillsCommand {
    /// Show a profile's skills in order.
    Show {
        /// Profile id.
        profile: ProfileId,
    },

    /// Replace a profile's skills. Pass no skills to clear the list.
    Set {
        /// Profile id.
        profile: ProfileId,

        /// New skills, in order. Duplicates are kept.
        skills: Vec<String>,

        /// Address acting on behalf of the profile.
        #[arg(long = "as", value_name = "ADDRESS")]
        caller: Address,
    },
}

/// Handle a skills subcommand.
pub async fn handle_skills_command(cmd: SkillsCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        SkillsCommand::Show { profile } => show(state, profile, json).await,
        SkillsCommand::Set {
            profile,
            skills,
            caller,
        } => set(state, profile, skills, &caller, json).await,
    }
}

async fn show(state: &AppState, profile: ProfileId, json: bool) -> Result<()> {
    let skills = state.skills.get_skills(profile).await?;

    if json {
        let result = serde_json::json!({
            "profile_id": profile,
            "skills": skills,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if skills.is_empty() {
        println!(
            "  {} Profile {} has no skills.",
            style("i").blue().bold(),
            style(profile).bold()
        );
        println!("     Set them with: jobstar skills set {profile} <skill>... --as <address>");
    } else {
        println!("  Skills of profile {}:", style(profile).bold());
        for (index, skill) in skills.iter().enumerate() {
            println!("  {:>3}. {}", index + 1, style(skill).cyan());
        }
    }
    println!();

    Ok(())
}

async fn set(
    state: &AppState,
    profile: ProfileId,
    skills: Vec<String>,
    caller: &Address,
    json: bool,
) -> Result<()> {
    let recorded = state
        .skills
        .update_skills(profile, skills, caller)
        .await
        .with_context(|| format!("Failed to update skills of profile {profile}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recorded)?);
        return Ok(());
    }

    if let jobstar_types::event::LedgerEvent::SkillsUpdated {
        old_skills,
        new_skills,
        ..
    } = &recorded.event
    {
        println!();
        println!(
            "  {} Skills of profile {} updated",
            style("ok").green(),
            style(profile).bold()
        );
        println!("  Before: {}", display_list(old_skills));
        println!("  After:  {}", display_list(new_skills));
        println!();
    }

    Ok(())
}

fn display_list(skills: &[String]) -> String {
    if skills.is_empty() {
        style("(none)").dim().to_string()
    } else {
        skills.join(", ")
    }
}
