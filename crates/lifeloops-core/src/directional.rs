//! Directional document: the user's stated priorities per loop.
//!
//! When an active document is present the suggestion engine adds four
//! adjustments to a template's score:
//!
//! | Term            | Formula                                      |
//! |-----------------|----------------------------------------------|
//! | Priority rank   | `28 - 4 * rank` (rank 0-indexed, if ranked)   |
//! | Dissatisfaction | `round((100 - satisfaction) / 100 * 20)`     |
//! | Allocation gap  | `round(gap / 50 * 15)` when desired > current |
//! | Season          | building +10, maintaining 0, recovering -5, hibernating -10 |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::loops::LoopId;

/// Life season declared for a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Building,
    #[default]
    Maintaining,
    Recovering,
    Hibernating,
}

impl Season {
    pub fn adjustment(&self) -> i32 {
        match self {
            Season::Building => 10,
            Season::Maintaining => 0,
            Season::Recovering => -5,
            Season::Hibernating => -10,
        }
    }
}

/// Whether the document is still being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Active,
}

/// Desired vs. current allocation for one loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopDirection {
    /// Desired share of time, percent.
    #[serde(default)]
    pub desired_allocation: f64,
    /// Current share of time, percent.
    #[serde(default)]
    pub current_allocation: f64,
    /// Current satisfaction, percent.
    #[serde(default = "default_satisfaction")]
    pub current_satisfaction: f64,
    #[serde(default)]
    pub season: Season,
}

fn default_satisfaction() -> f64 {
    100.0
}

impl Default for LoopDirection {
    fn default() -> Self {
        Self {
            desired_allocation: 0.0,
            current_allocation: 0.0,
            current_satisfaction: default_satisfaction(),
            season: Season::Maintaining,
        }
    }
}

/// Structured statement of where the user wants their time to go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionalDocument {
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub loops: HashMap<LoopId, LoopDirection>,
    /// Loops ordered from highest to lowest priority.
    #[serde(default)]
    pub priority_ranking: Vec<LoopId>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DirectionalDocument {
    /// Only active documents bias suggestions.
    pub fn is_active(&self) -> bool {
        self.status == DocumentStatus::Active
    }

    /// Derive the scoring facts for one loop.
    pub fn facts_for(&self, loop_id: LoopId) -> DirectionalFacts {
        let priority_rank = self.priority_ranking.iter().position(|l| *l == loop_id);
        let direction = self.loops.get(&loop_id);

        let satisfaction = direction.map(|d| sanitize_percent(d.current_satisfaction));
        let allocation = direction.map(|d| {
            (
                sanitize_percent(d.current_allocation),
                sanitize_percent(d.desired_allocation),
            )
        });

        DirectionalFacts {
            loop_id,
            priority_rank,
            satisfaction,
            allocation,
            season: direction.map(|d| d.season),
        }
    }
}

fn sanitize_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Per-loop facts derived from a directional document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalFacts {
    pub loop_id: LoopId,
    /// 0-indexed position in the priority ranking.
    pub priority_rank: Option<usize>,
    /// Current satisfaction percent.
    pub satisfaction: Option<f64>,
    /// `(current, desired)` allocation percents.
    pub allocation: Option<(f64, f64)>,
    pub season: Option<Season>,
}

impl DirectionalFacts {
    pub fn priority_bonus(&self) -> i32 {
        self.priority_rank
            .map(|rank| 28 - 4 * rank as i32)
            .unwrap_or(0)
    }

    pub fn dissatisfaction_bonus(&self) -> i32 {
        self.satisfaction
            .map(|s| ((100.0 - s) / 100.0 * 20.0).round() as i32)
            .unwrap_or(0)
    }

    /// Positive gap between desired and current allocation.
    pub fn allocation_gap(&self) -> f64 {
        match self.allocation {
            Some((current, desired)) if desired > current => desired - current,
            _ => 0.0,
        }
    }

    pub fn allocation_bonus(&self) -> i32 {
        (self.allocation_gap() / 50.0 * 15.0).round() as i32
    }

    pub fn season_adjustment(&self) -> i32 {
        self.season.map(|s| s.adjustment()).unwrap_or(0)
    }

    /// Sum of every directional adjustment.
    pub fn total(&self) -> i32 {
        self.priority_bonus()
            + self.dissatisfaction_bonus()
            + self.allocation_bonus()
            + self.season_adjustment()
    }
}
