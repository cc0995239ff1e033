//! User archetypes and the blend produced during onboarding.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Personality/behavior style used to bias recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    Machine,
    Scientist,
    Warrior,
    Artist,
    Caregiver,
    Explorer,
    Stoic,
    Entrepreneur,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Machine,
        Archetype::Scientist,
        Archetype::Warrior,
        Archetype::Artist,
        Archetype::Caregiver,
        Archetype::Explorer,
        Archetype::Stoic,
        Archetype::Entrepreneur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Machine => "Machine",
            Archetype::Scientist => "Scientist",
            Archetype::Warrior => "Warrior",
            Archetype::Artist => "Artist",
            Archetype::Caregiver => "Caregiver",
            Archetype::Explorer => "Explorer",
            Archetype::Stoic => "Stoic",
            Archetype::Entrepreneur => "Entrepreneur",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid("archetype", format!("unknown archetype '{s}'")))
    }
}

/// Weight of the primary archetype in the base score.
pub const PRIMARY_WEIGHT: f64 = 0.5;
/// Weight of the secondary archetype in the base score.
pub const SECONDARY_WEIGHT: f64 = 0.35;
/// Weight of the tertiary archetype in the base score.
pub const TERTIARY_WEIGHT: f64 = 0.15;

/// A user's archetype blend as stored by onboarding.
///
/// Every field is optional because onboarding may be incomplete; use
/// [`UserPrototype::blend`] to obtain the validated form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPrototype {
    #[serde(default)]
    pub primary: Option<Archetype>,
    #[serde(default)]
    pub secondary: Option<Archetype>,
    #[serde(default)]
    pub tertiary: Option<Archetype>,
    /// Score 0-100 per archetype.
    #[serde(default)]
    pub scores: HashMap<Archetype, f64>,
}

impl UserPrototype {
    /// Score for `archetype`, clamped to 0-100. Missing or non-finite scores are 0.
    pub fn score(&self, archetype: Archetype) -> f64 {
        match self.scores.get(&archetype) {
            Some(s) if s.is_finite() => s.clamp(0.0, 100.0),
            _ => 0.0,
        }
    }

    /// The validated blend, present only when primary and secondary are both set.
    pub fn blend(&self) -> Option<ArchetypeBlend> {
        let primary = self.primary?;
        let secondary = self.secondary?;
        Some(ArchetypeBlend {
            primary: BlendSlot::new(primary, self.score(primary)),
            secondary: BlendSlot::new(secondary, self.score(secondary)),
            tertiary: self.tertiary.map(|t| BlendSlot::new(t, self.score(t))),
        })
    }
}

/// One archetype in a blend with its percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendSlot {
    pub archetype: Archetype,
    /// Blend percentage, 0-100.
    pub percent: f64,
}

impl BlendSlot {
    fn new(archetype: Archetype, percent: f64) -> Self {
        Self { archetype, percent }
    }
}

/// A complete archetype blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeBlend {
    pub primary: BlendSlot,
    pub secondary: BlendSlot,
    pub tertiary: Option<BlendSlot>,
}

impl ArchetypeBlend {
    /// Slots paired with their scoring weight, primary first.
    pub fn slots(&self) -> impl Iterator<Item = (BlendSlot, f64)> + '_ {
        [
            Some((self.primary, PRIMARY_WEIGHT)),
            Some((self.secondary, SECONDARY_WEIGHT)),
            self.tertiary.map(|t| (t, TERTIARY_WEIGHT)),
        ]
        .into_iter()
        .flatten()
    }
}
