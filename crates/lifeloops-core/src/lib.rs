//! # Life Loops Core Library
//!
//! This library provides the core logic for Life Loops, a personal planner
//! organized around seven life "loops" (Health, Wealth, Family, Work, Fun,
//! Maintenance, Meaning). All operations are available through the standalone
//! CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Suggestion Engine**: Ranks a static catalog of goal templates against a
//!   user's archetype blend, loop capacity states, existing goals, and an
//!   optional directional document
//! - **Goal Hierarchy**: Annual to daily goals linked as a tree, with
//!   calendar-based decomposition into quarterly and monthly children
//! - **Storage**: SQLite-based goal and profile storage and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`generate_goal_suggestions`]: Ranked, explained template suggestions
//! - [`GoalHierarchy`]: In-memory goal tree with invariant checks
//! - [`decompose_annual_to_quarterly`]: Calendar-quarter breakdown
//! - [`GoalDb`]: Goal and profile persistence
//! - [`Config`]: Application configuration management

pub mod archetype;
pub mod directional;
pub mod error;
pub mod goals;
pub mod loops;
pub mod storage;
pub mod suggest;

pub use archetype::{Archetype, ArchetypeBlend, UserPrototype};
pub use directional::{DirectionalDocument, DirectionalFacts, DocumentStatus, LoopDirection, Season};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use goals::{
    decompose_annual_to_quarterly, decompose_quarterly_to_monthly, goal_from_template, Goal,
    GoalHierarchy, GoalMetric, GoalStatus, Timeframe,
};
pub use loops::{state_for, LoopId, LoopState, LoopStates};
pub use storage::{Config, GoalDb};
pub use suggest::{
    find_template, generate_goal_suggestions, generate_goal_suggestions_from, GoalSuggestion,
    GoalTemplate, ScoreBreakdown, CATALOG,
};
