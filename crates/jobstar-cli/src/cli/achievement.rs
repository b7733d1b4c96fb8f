//! Achievement CLI subcommands.
//!
//! Proposals are made by the issuer profile's owner; acceptance by the
//! worker profile's owner. Every mutating command takes `--as <address>`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::profile::{Address, ProfileId};

use crate::state::AppState;

/// Achievement subcommands.
#[derive(Subcommand)]
pub enum AchievementCommand {
    /// Propose an achievement for a worker, as the issuer.
    Propose {
        /// Issuer profile id (must be owned by --as).
        #[arg(long)]
        issuer: ProfileId,

        /// Worker profile id.
        #[arg(long)]
        worker: ProfileId,

        /// Short title.
        #[arg(long)]
        title: String,

        /// Longer description of the delivered work.
        #[arg(long)]
        description: String,

        /// Delivery timestamp (RFC 3339). Defaults to now.
        #[arg(long)]
        delivered_at: Option<DateTime<Utc>>,

        /// Image URI to attach.
        #[arg(long, default_value = "")]
        image_uri: String,

        /// Skill the achievement vouches for (matched exactly).
        #[arg(long)]
        skill: String,

        /// Address acting on behalf of the issuer profile.
        #[arg(long = "as", value_name = "ADDRESS")]
        caller: Address,
    },

    /// Accept a pending achievement, as the worker.
    Accept {
        /// Achievement id.
        id: AchievementId,

        /// Address acting on behalf of the worker profile.
        #[arg(long = "as", value_name = "ADDRESS")]
        caller: Address,
    },

    /// Show an achievement.
    Show {
        /// Achievement id.
        id: AchievementId,
    },

    /// Count a worker's pending achievements.
    Pending {
        /// Worker profile id.
        worker: ProfileId,
    },

    /// Count a worker's accepted achievements for one skill.
    Count {
        /// Worker profile id.
        worker: ProfileId,

        /// Skill name (case-sensitive).
        skill: String,
    },

    /// List accepted achievements in the order they were accepted.
    Accepted,
}

/// Handle an achievement subcommand.
pub async fn handle_achievement_command(
    cmd: AchievementCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        AchievementCommand::Propose {
            issuer,
            worker,
            title,
            description,
            delivered_at,
            image_uri,
            skill,
            caller,
        } => {
            let content = AchievementContent {
                issuer_profile_id: issuer,
                worker_profile_id: worker,
                title,
                description,
                date_of_delivery: delivered_at.unwrap_or_else(Utc::now),
                image_uri,
                skill,
            };
            propose(state, content, &caller, json).await
        }
        AchievementCommand::Accept { id, caller } => accept(state, id, &caller, json).await,
        AchievementCommand::Show { id } => show(state, id, json).await,
        AchievementCommand::Pending { worker } => pending(state, worker, json).await,
        AchievementCommand::Count { worker, skill } => count(state, worker, &skill, json).await,
        AchievementCommand::Accepted => accepted(state, json).await,
    }
}

async fn propose(
    state: &AppState,
    content: AchievementContent,
    caller: &Address,
    json: bool,
) -> Result<()> {
    let issuer = content.issuer_profile_id;
    let worker = content.worker_profile_id;

    let id = state
        .achievements
        .propose_achievement(content, caller)
        .await
        .with_context(|| format!("Failed to propose achievement as profile {issuer}"))?;

    if json {
        let result = serde_json::json!({
            "achievement_id": id,
            "issuer_profile_id": issuer,
            "worker_profile_id": worker,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Proposed achievement {} for profile {}",
            style("ok").green(),
            style(id).bold(),
            style(worker).cyan(),
        );
        println!("     Accept with: jobstar achievement accept {id} --as <worker-owner>");
        println!();
    }

    Ok(())
}

async fn accept(state: &AppState, id: AchievementId, caller: &Address, json: bool) -> Result<()> {
    state
        .achievements
        .accept_achievement(id, caller)
        .await
        .with_context(|| format!("Failed to accept achievement {id}"))?;

    if json {
        let result = serde_json::json!({
            "achievement_id": id,
            "accepted": true,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  {} Accepted achievement {}", style("ok").green(), style(id).bold());
        println!();
    }

    Ok(())
}

async fn show(state: &AppState, id: AchievementId, json: bool) -> Result<()> {
    let achievement = state.achievements.get_achievement_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&achievement)?);
        return Ok(());
    }

    let content = &achievement.content;
    println!();
    println!(
        "  {} {}",
        style(format!("#{}", achievement.id)).bold(),
        style(&content.title).cyan().bold()
    );
    println!("  Status:    {}", status_label(&achievement));
    println!("  Issuer:    profile {}", content.issuer_profile_id);
    println!("  Worker:    profile {}", content.worker_profile_id);
    println!("  Skill:     {}", content.skill);
    println!("  Delivered: {}", content.date_of_delivery.format("%Y-%m-%d %H:%M UTC"));
    if !content.image_uri.is_empty() {
        println!("  Image:     {}", content.image_uri);
    }
    if !content.description.is_empty() {
        println!();
        println!("  {}", content.description);
    }
    println!();

    Ok(())
}

async fn pending(state: &AppState, worker: ProfileId, json: bool) -> Result<()> {
    let count = state
        .achievements
        .get_pending_achievements_count(worker)
        .await?;

    if json {
        let result = serde_json::json!({
            "worker_profile_id": worker,
            "pending": count,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "  Profile {} has {} pending achievement(s)",
            style(worker).bold(),
            style(count).yellow()
        );
    }

    Ok(())
}

async fn count(state: &AppState, worker: ProfileId, skill: &str, json: bool) -> Result<()> {
    let count = state
        .achievements
        .get_achievements_count(worker, skill)
        .await?;

    if json {
        let result = serde_json::json!({
            "worker_profile_id": worker,
            "skill": skill,
            "accepted": count,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "  Profile {} has {} accepted '{}' achievement(s)",
            style(worker).bold(),
            style(count).green(),
            style(skill).cyan()
        );
    }

    Ok(())
}

async fn accepted(state: &AppState, json: bool) -> Result<()> {
    let achievements = state.achievements.accepted_achievements().await?;

    if json {
        let result = serde_json::json!({
            "achievements": achievements,
            "count": achievements.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if achievements.is_empty() {
        println!();
        println!("  {} No accepted achievements yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Skill").fg(Color::White),
        Cell::new("Issuer").fg(Color::White),
        Cell::new("Worker").fg(Color::White),
        Cell::new("Delivered").fg(Color::White),
    ]);

    for achievement in &achievements {
        let content = &achievement.content;
        table.add_row(vec![
            Cell::new(achievement.id).fg(Color::Cyan),
            Cell::new(&content.title),
            Cell::new(&content.skill).fg(Color::Green),
            Cell::new(content.issuer_profile_id),
            Cell::new(content.worker_profile_id),
            Cell::new(content.date_of_delivery.format("%Y-%m-%d")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

fn status_label(achievement: &Achievement) -> String {
    if achievement.accepted {
        style("accepted").green().to_string()
    } else {
        style("pending").yellow().to_string()
    }
}
