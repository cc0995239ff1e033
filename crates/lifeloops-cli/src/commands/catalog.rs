//! Goal template catalog commands for CLI.

use clap::Subcommand;
use lifeloops_core::suggest::templates_for_loop;
use lifeloops_core::{find_template, GoalTemplate, LoopId, CATALOG};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List templates
    List {
        /// Only templates for this loop
        #[arg(long = "loop")]
        loop_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single template
    Show {
        /// Template ID
        id: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List { loop_id, json } => {
            let templates: Vec<&GoalTemplate> = match loop_id {
                Some(raw) => templates_for_loop(raw.parse::<LoopId>()?).collect(),
                None => CATALOG.iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else {
                for t in templates {
                    println!("{:<28} {:<12} {:<10} {}", t.id, t.loop_id, t.timeframe, t.title);
                }
            }
        }
        CatalogAction::Show { id } => {
            let template =
                find_template(&id).ok_or_else(|| format!("Template '{}' not found", id))?;
            println!("{} ({})", template.title, template.id);
            println!("Loop: {}  Timeframe: {}", template.loop_id, template.timeframe);
            println!("{}", template.description);
            if !template.affinities.is_empty() {
                println!();
                println!("Archetype affinity:");
                for (archetype, value) in template.affinities {
                    println!("  {:<14} {:.2}", archetype.as_str(), value);
                }
            }
            if !template.suggested_metrics.is_empty() {
                println!();
                println!("Suggested metrics:");
                for m in template.suggested_metrics {
                    println!("  {}: {} {}", m.name, m.target, m.unit);
                }
            }
        }
    }
    Ok(())
}
