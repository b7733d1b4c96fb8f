//! Ledger status dashboard command.

use anyhow::Result;
use console::style;

use jobstar_types::event::EventKind;

use crate::state::AppState;

/// Display ledger status: profile and achievement totals plus storage info.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let profiles = state.profiles.count().await?;
    let achievements = state.achievements.total_achievements().await?;
    let pending = state.achievements.get_total_pending_count().await?;
    let events = state.achievements.events(None).await?;
    let accepted = events
        .iter()
        .filter(|e| e.event.kind() == EventKind::AchievementAccepted)
        .count();
    let skill_updates = events
        .iter()
        .filter(|e| e.event.kind() == EventKind::SkillsUpdated)
        .count();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "database_file": state.config.database_file,
            "profiles": profiles,
            "achievements": {
                "total": achievements,
                "accepted": accepted,
                "pending": pending,
            },
            "skill_updates": skill_updates,
            "events": events.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} JobStar v{}", style("*").bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Profiles ──").dim());
    println!("  Minted:   {}", style(profiles).bold());
    println!();

    println!("  {}", style("── Achievements ──").dim());
    println!("  Total:    {}", style(achievements).bold());
    println!("  Accepted: {}", style(accepted).green());
    println!("  Pending:  {}", style(pending).yellow());
    println!();

    println!("  {}", style("── Journal ──").dim());
    println!("  Events:        {}", events.len());
    println!("  Skill updates: {}", skill_updates);
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!(
        "  Database: {} {}",
        style(&state.config.database_file).dim(),
        style("(SQLite, WAL mode)").dim()
    );
    println!();

    Ok(())
}
