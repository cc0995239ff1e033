//! Archetype profile commands.
//!
//! The profile is normally written by onboarding; these commands let it be
//! inspected and edited by hand.

use clap::Subcommand;
use lifeloops_core::{Archetype, GoalDb, UserPrototype};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored archetype blend
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the archetype blend
    Set {
        /// Primary archetype
        #[arg(long)]
        primary: String,
        /// Secondary archetype
        #[arg(long)]
        secondary: String,
        /// Tertiary archetype
        #[arg(long)]
        tertiary: Option<String>,
        /// Archetype score as NAME=VALUE (repeatable, e.g. --score Machine=70)
        #[arg(long = "score")]
        scores: Vec<String>,
    },
    /// List the known archetypes
    Archetypes,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Show { json } => show(json),
        ProfileAction::Set {
            primary,
            secondary,
            tertiary,
            scores,
        } => set(&primary, &secondary, tertiary.as_deref(), &scores),
        ProfileAction::Archetypes => {
            for archetype in Archetype::ALL {
                println!("{archetype}");
            }
            Ok(())
        }
    }
}

fn show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;
    let Some(prototype) = db.load_prototype()? else {
        println!("No profile set.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&prototype)?);
        return Ok(());
    }

    match prototype.blend() {
        Some(blend) => {
            for (slot, weight) in blend.slots() {
                println!(
                    "{:<14} {:>5.1}%  (weight {:.2})",
                    slot.archetype, slot.percent, weight
                );
            }
        }
        None => println!("Profile is incomplete; suggestions use neutral scores."),
    }
    Ok(())
}

fn set(
    primary: &str,
    secondary: &str,
    tertiary: Option<&str>,
    scores: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut prototype = UserPrototype {
        primary: Some(primary.parse()?),
        secondary: Some(secondary.parse()?),
        tertiary: tertiary.map(str::parse).transpose()?,
        ..UserPrototype::default()
    };

    for raw in scores {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("invalid score '{raw}', expected NAME=VALUE"))?;
        let archetype: Archetype = name.parse()?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid score value '{value}' for {archetype}"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("score for {archetype} must be 0-100, got {value}").into());
        }
        prototype.scores.insert(archetype, value);
    }

    let db = GoalDb::open()?;
    db.save_prototype(&prototype)?;
    println!("profile saved");
    Ok(())
}
