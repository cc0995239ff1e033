//! Goal suggestion command for CLI.

use clap::Args;
use lifeloops_core::{generate_goal_suggestions, Config, GoalDb};

#[derive(Args)]
pub struct SuggestArgs {
    /// Number of suggestions (defaults to suggestions.default_count)
    #[arg(short, long)]
    count: Option<usize>,
    /// Output as JSON, including the score breakdown
    #[arg(long)]
    json: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = GoalDb::open()?;

    let prototype = db.load_prototype()?.unwrap_or_default();
    let loop_states = db.load_loop_states()?;
    let goals = db.load_hierarchy()?;
    let directional = db.load_directional()?;
    let count = args.count.unwrap_or(config.suggestions.default_count);

    let suggestions =
        generate_goal_suggestions(&prototype, &loop_states, &goals, directional.as_ref(), count);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    if prototype.blend().is_none() {
        println!("(no archetype blend set; use 'profile set' for personalized scores)");
    }
    for (i, s) in suggestions.iter().enumerate() {
        println!(
            "{:>2}. [{:>3}] {} ({}, {})",
            i + 1,
            s.relevance_score,
            s.template.title,
            s.template.loop_id,
            s.template.timeframe
        );
        println!("       {}", s.reasoning);
        println!("       id: {}", s.template.id);
    }
    Ok(())
}
