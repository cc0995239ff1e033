//! Directional document commands.

use chrono::Utc;
use clap::Subcommand;
use lifeloops_core::{DirectionalDocument, GoalDb, LoopId};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DirectionAction {
    /// Show the stored directional document
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import a directional document from a JSON file
    Import {
        /// Path to the JSON document
        file: PathBuf,
    },
    /// Remove the stored directional document
    Clear,
}

pub fn run(action: DirectionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;
    match action {
        DirectionAction::Show { json } => {
            let Some(document) = db.load_directional()? else {
                println!("No directional document.");
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
                return Ok(());
            }
            let status = if document.is_active() { "active" } else { "draft (ignored)" };
            println!("Status: {status}");
            for loop_id in LoopId::LIFE_LOOPS {
                let facts = document.facts_for(loop_id);
                let rank = facts
                    .priority_rank
                    .map(|r| format!("#{}", r + 1))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<12} {:>3}  adjustment {:+}", loop_id, rank, facts.total());
            }
        }
        DirectionAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let mut document: DirectionalDocument = serde_json::from_str(&content)?;
            if document.updated_at.is_none() {
                document.updated_at = Some(Utc::now());
            }
            db.save_directional(&document)?;
            println!("directional document imported from {}", file.display());
        }
        DirectionAction::Clear => {
            db.clear_directional()?;
            println!("directional document cleared");
        }
    }
    Ok(())
}
