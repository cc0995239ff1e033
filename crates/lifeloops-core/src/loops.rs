//! Life loops and their capacity states.
//!
//! Seven loops partition a user's life; `Life` is an umbrella category that
//! goals may target but that never carries templates or a capacity state of
//! its own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A life-management area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoopId {
    Health,
    Wealth,
    Family,
    Work,
    Fun,
    Maintenance,
    Meaning,
    /// Umbrella category spanning every loop.
    Life,
}

impl LoopId {
    /// The seven proper loops in canonical order.
    pub const LIFE_LOOPS: [LoopId; 7] = [
        LoopId::Health,
        LoopId::Wealth,
        LoopId::Family,
        LoopId::Work,
        LoopId::Fun,
        LoopId::Maintenance,
        LoopId::Meaning,
    ];

    /// Every loop including the `Life` umbrella.
    pub const ALL: [LoopId; 8] = [
        LoopId::Health,
        LoopId::Wealth,
        LoopId::Family,
        LoopId::Work,
        LoopId::Fun,
        LoopId::Maintenance,
        LoopId::Meaning,
        LoopId::Life,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopId::Health => "Health",
            LoopId::Wealth => "Wealth",
            LoopId::Family => "Family",
            LoopId::Work => "Work",
            LoopId::Fun => "Fun",
            LoopId::Maintenance => "Maintenance",
            LoopId::Meaning => "Meaning",
            LoopId::Life => "Life",
        }
    }
}

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LoopId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoopId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid("loop", format!("unknown loop '{s}'")))
    }
}

/// How much new commitment a user wants in a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoopState {
    /// Actively growing; take on more.
    Build,
    /// Holding steady.
    #[default]
    Maintain,
    /// Recovering from overload; keep demands light.
    Recover,
    /// Deliberately dormant.
    Hibernate,
}

impl LoopState {
    pub const ALL: [LoopState; 4] = [
        LoopState::Build,
        LoopState::Maintain,
        LoopState::Recover,
        LoopState::Hibernate,
    ];

    /// Multiplier applied to a template's base score.
    pub fn multiplier(&self) -> f64 {
        match self {
            LoopState::Build => 1.3,
            LoopState::Maintain => 1.1,
            LoopState::Recover => 0.9,
            LoopState::Hibernate => 0.7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Build => "BUILD",
            LoopState::Maintain => "MAINTAIN",
            LoopState::Recover => "RECOVER",
            LoopState::Hibernate => "HIBERNATE",
        }
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LoopState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoopState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid("state", format!("unknown loop state '{s}'")))
    }
}

/// Per-loop capacity states as read from the loop-state store.
pub type LoopStates = HashMap<LoopId, LoopState>;

/// State of `loop_id`, treating a missing entry as `MAINTAIN`.
pub fn state_for(states: &LoopStates, loop_id: LoopId) -> LoopState {
    states.get(&loop_id).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_are_ordered_by_capacity() {
        assert_eq!(LoopState::Build.multiplier(), 1.3);
        assert_eq!(LoopState::Maintain.multiplier(), 1.1);
        assert_eq!(LoopState::Recover.multiplier(), 0.9);
        assert_eq!(LoopState::Hibernate.multiplier(), 0.7);
    }

    #[test]
    fn missing_state_defaults_to_maintain() {
        let mut states = LoopStates::new();
        states.insert(LoopId::Health, LoopState::Build);
        assert_eq!(state_for(&states, LoopId::Health), LoopState::Build);
        assert_eq!(state_for(&states, LoopId::Wealth), LoopState::Maintain);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("health".parse::<LoopId>().unwrap(), LoopId::Health);
        assert_eq!("MAINTENANCE".parse::<LoopId>().unwrap(), LoopId::Maintenance);
        assert_eq!("build".parse::<LoopState>().unwrap(), LoopState::Build);
        assert!("chores".parse::<LoopId>().is_err());
        assert!("sprint".parse::<LoopState>().is_err());
    }

    #[test]
    fn life_is_not_a_proper_loop() {
        assert!(!LoopId::LIFE_LOOPS.contains(&LoopId::Life));
        assert!(LoopId::ALL.contains(&LoopId::Life));
    }

    #[test]
    fn loop_state_serializes_upper_case() {
        let json = serde_json::to_string(&LoopState::Hibernate).unwrap();
        assert_eq!(json, "\"HIBERNATE\"");
        let parsed: LoopState = serde_json::from_str("\"BUILD\"").unwrap();
        assert_eq!(parsed, LoopState::Build);
    }
}
