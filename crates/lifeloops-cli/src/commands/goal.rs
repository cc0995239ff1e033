//! Goal management commands for CLI.
//!
//! Goals are loaded as a whole hierarchy, edited in memory, and written back
//! so parent/child links stay consistent.

use chrono::Utc;
use clap::Subcommand;
use lifeloops_core::{
    decompose_annual_to_quarterly, decompose_quarterly_to_monthly, find_template,
    goal_from_template, Goal, GoalDb, GoalHierarchy, Timeframe,
};

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals
    List {
        /// Only goals with this timeframe (annual, quarterly, monthly, weekly, daily)
        #[arg(long)]
        timeframe: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a goal from a catalog template
    Adopt {
        /// Template ID (see 'catalog list')
        template_id: String,
    },
    /// Show a goal
    Show {
        /// Goal ID
        id: String,
    },
    /// Update goal progress
    Progress {
        /// Goal ID
        id: String,
        /// Percent complete (0-100)
        percent: u8,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
    /// Break an annual goal into quarters, or a quarterly goal into months
    Decompose {
        /// Goal ID
        id: String,
    },
    /// Check hierarchy consistency
    Validate,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;

    match action {
        GoalAction::List { timeframe, json } => {
            let hierarchy = db.load_hierarchy()?;
            let goals: Vec<&Goal> = match timeframe {
                Some(raw) => hierarchy.list(raw.parse::<Timeframe>()?).iter().collect(),
                None => hierarchy.iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else if goals.is_empty() {
                println!("No goals.");
            } else {
                for g in goals {
                    print_line(g);
                }
            }
        }
        GoalAction::Adopt { template_id } => {
            let template = find_template(&template_id)
                .ok_or_else(|| format!("Template '{}' not found", template_id))?;
            let goal = goal_from_template(template, Utc::now());
            db.upsert_goal(&goal)?;
            println!("Goal created: {}", goal.id);
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::Show { id } => {
            let goal = db.get_goal(&id)?.ok_or_else(|| format!("Goal '{}' not found", id))?;
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::Progress { id, percent } => {
            if percent > 100 {
                return Err(format!("progress must be 0-100, got {percent}").into());
            }
            let mut goal = db.get_goal(&id)?.ok_or_else(|| format!("Goal '{}' not found", id))?;
            goal.set_progress(percent, Utc::now());
            db.upsert_goal(&goal)?;
            println!("{}: {}% ({})", goal.id, goal.progress, goal.status.as_str());
        }
        GoalAction::Delete { id } => {
            let mut hierarchy = db.load_hierarchy()?;
            if hierarchy.remove(&id).is_none() {
                return Err(format!("Goal '{}' not found", id).into());
            }
            db.save_hierarchy(&hierarchy)?;
            println!("Goal deleted: {id}");
        }
        GoalAction::Decompose { id } => {
            let mut hierarchy = db.load_hierarchy()?;
            let children = decompose(&hierarchy, &id)?;
            let count = children.len();
            tracing::debug!(parent = %id, count, "saving decomposed goals");
            hierarchy.attach_children(&id, children)?;
            db.save_hierarchy(&hierarchy)?;
            println!("Created {count} goals from {id}");
        }
        GoalAction::Validate => {
            let hierarchy = db.load_hierarchy()?;
            hierarchy.validate()?;
            println!("ok ({} goals)", hierarchy.len());
        }
    }
    Ok(())
}

fn decompose(hierarchy: &GoalHierarchy, id: &str) -> Result<Vec<Goal>, Box<dyn std::error::Error>> {
    let goal = hierarchy
        .find(id)
        .ok_or_else(|| format!("Goal '{}' not found", id))?;
    let now = Utc::now();
    match goal.timeframe {
        Timeframe::Annual => Ok(decompose_annual_to_quarterly(goal, now)),
        Timeframe::Quarterly => Ok(decompose_quarterly_to_monthly(goal, now)),
        other => Err(format!("cannot decompose a {other} goal").into()),
    }
}

fn print_line(goal: &Goal) {
    println!(
        "{:<36} {:<10} {:<12} {:>3}% {}",
        goal.id, goal.timeframe, goal.loop_id, goal.progress, goal.title
    );
}
