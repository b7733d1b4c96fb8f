//! Event journal listing.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use jobstar_types::event::{EventKind, LedgerEvent};

use crate::state::AppState;

/// Short names for the `--kind` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFilter {
    Skills,
    Proposed,
    Accepted,
}

impl From<EventFilter> for EventKind {
    fn from(filter: EventFilter) -> Self {
        match filter {
            EventFilter::Skills => EventKind::SkillsUpdated,
            EventFilter::Proposed => EventKind::AchievementProposed,
            EventFilter::Accepted => EventKind::AchievementAccepted,
        }
    }
}

/// List journaled events, oldest first.
pub async fn list_events(state: &AppState, kind: Option<EventFilter>, json: bool) -> Result<()> {
    let events = state.achievements.events(kind.map(EventKind::from)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!();
        println!("  {} No events recorded.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Event").fg(Color::White),
        Cell::new("Details").fg(Color::White),
        Cell::new("Recorded").fg(Color::White),
    ]);

    for recorded in &events {
        let kind_cell = match recorded.event.kind() {
            EventKind::SkillsUpdated => Cell::new("SkillsUpdated").fg(Color::Blue),
            EventKind::AchievementProposed => Cell::new("AchievementProposed").fg(Color::Yellow),
            EventKind::AchievementAccepted => Cell::new("AchievementAccepted").fg(Color::Green),
        };

        table.add_row(vec![
            Cell::new(recorded.sequence),
            kind_cell,
            Cell::new(describe(&recorded.event)),
            Cell::new(recorded.recorded_at.format("%Y-%m-%d %H:%M:%S")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

fn describe(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::SkillsUpdated {
            owner,
            profile_id,
            old_skills,
            new_skills,
        } => format!(
            "profile {profile_id} by {owner}: [{}] -> [{}]",
            old_skills.join(", "),
            new_skills.join(", ")
        ),
        LedgerEvent::AchievementProposed {
            achievement_id,
            issuer_profile_id,
            worker_profile_id,
        } => format!(
            "achievement {achievement_id}: issuer {issuer_profile_id}, worker {worker_profile_id}"
        ),
        LedgerEvent::AchievementAccepted {
            issuer_profile_id,
            worker_profile_id,
            achievement_id,
        } => format!(
            "achievement {achievement_id}: issuer {issuer_profile_id}, worker {worker_profile_id}"
        ),
    }
}
