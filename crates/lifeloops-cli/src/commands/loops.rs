use clap::Subcommand;
use lifeloops_core::{state_for, GoalDb, LoopId, LoopState};

#[derive(Subcommand)]
pub enum LoopsAction {
    /// Show the capacity state of every loop
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a loop's capacity state
    Set {
        /// Loop name (Health, Wealth, Family, Work, Fun, Maintenance, Meaning)
        #[arg(value_name = "LOOP")]
        loop_id: String,
        /// BUILD, MAINTAIN, RECOVER or HIBERNATE
        state: String,
    },
}

pub fn run(action: LoopsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = GoalDb::open()?;
    match action {
        LoopsAction::Show { json } => {
            let states = db.load_loop_states()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&states)?);
            } else {
                for loop_id in LoopId::LIFE_LOOPS {
                    let state = state_for(&states, loop_id);
                    println!("{:<12} {:<9} x{:.1}", loop_id, state, state.multiplier());
                }
            }
        }
        LoopsAction::Set { loop_id, state } => {
            let loop_id: LoopId = loop_id.parse()?;
            if loop_id == LoopId::Life {
                return Err("Life is an umbrella category and has no state".into());
            }
            let state: LoopState = state.parse()?;
            db.set_loop_state(loop_id, state)?;
            println!("{loop_id} -> {state}");
        }
    }
    Ok(())
}
