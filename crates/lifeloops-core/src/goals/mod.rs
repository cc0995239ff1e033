//! Goal hierarchy: annual goals broken down into progressively finer goals.
//!
//! Goals form a forest. Each goal has at most one parent, the parent's
//! `child_goal_ids` lists the child, and a child's timeframe is strictly finer
//! than its parent's.

mod create;
mod decompose;

pub use create::{goal_from_template, period_end};
pub use decompose::{decompose_annual_to_quarterly, decompose_quarterly_to_monthly};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::loops::LoopId;

/// Planning horizon of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Annual,
    Quarterly,
    Monthly,
    Weekly,
    Daily,
}

impl Timeframe {
    /// Coarsest to finest.
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Annual,
        Timeframe::Quarterly,
        Timeframe::Monthly,
        Timeframe::Weekly,
        Timeframe::Daily,
    ];

    /// 0 for annual through 4 for daily.
    pub fn granularity(&self) -> u8 {
        match self {
            Timeframe::Annual => 0,
            Timeframe::Quarterly => 1,
            Timeframe::Monthly => 2,
            Timeframe::Weekly => 3,
            Timeframe::Daily => 4,
        }
    }

    pub fn is_finer_than(&self, other: Timeframe) -> bool {
        self.granularity() > other.granularity()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Annual => "annual",
            Timeframe::Quarterly => "quarterly",
            Timeframe::Monthly => "monthly",
            Timeframe::Weekly => "weekly",
            Timeframe::Daily => "daily",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid("timeframe", format!("unknown timeframe '{s}'")))
    }
}

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
    Abandoned,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Paused => "paused",
            GoalStatus::Abandoned => "abandoned",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "paused" => Ok(GoalStatus::Paused),
            "abandoned" => Ok(GoalStatus::Abandoned),
            _ => Err(ValidationError::invalid("status", format!("unknown status '{s}'"))),
        }
    }
}

/// A measurable target attached to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalMetric {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub current: f64,
    pub target: f64,
}

/// A user goal at any timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "loop")]
    pub loop_id: LoopId,
    pub timeframe: Timeframe,
    #[serde(default)]
    pub parent_goal_id: Option<String>,
    #[serde(default)]
    pub child_goal_ids: Vec<String>,
    #[serde(default)]
    pub status: GoalStatus,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub metrics: Vec<GoalMetric>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Update progress, marking the goal completed at 100%.
    pub fn set_progress(&mut self, progress: u8, now: DateTime<Utc>) {
        self.progress = progress.min(100);
        if self.progress == 100 {
            self.status = GoalStatus::Completed;
        } else if self.status == GoalStatus::Completed {
            self.status = GoalStatus::Active;
        }
        self.updated_at = now;
    }

    /// Check that the target date does not precede the start date.
    pub fn validate_dates(&self) -> Result<(), ValidationError> {
        if self.target_date < self.start_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                target: self.target_date,
            });
        }
        Ok(())
    }
}

/// All of a user's goals, one ordered list per timeframe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalHierarchy {
    #[serde(default)]
    pub annual: Vec<Goal>,
    #[serde(default)]
    pub quarterly: Vec<Goal>,
    #[serde(default)]
    pub monthly: Vec<Goal>,
    #[serde(default)]
    pub weekly: Vec<Goal>,
    #[serde(default)]
    pub daily: Vec<Goal>,
}

impl GoalHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, timeframe: Timeframe) -> &[Goal] {
        match timeframe {
            Timeframe::Annual => &self.annual,
            Timeframe::Quarterly => &self.quarterly,
            Timeframe::Monthly => &self.monthly,
            Timeframe::Weekly => &self.weekly,
            Timeframe::Daily => &self.daily,
        }
    }

    fn list_mut(&mut self, timeframe: Timeframe) -> &mut Vec<Goal> {
        match timeframe {
            Timeframe::Annual => &mut self.annual,
            Timeframe::Quarterly => &mut self.quarterly,
            Timeframe::Monthly => &mut self.monthly,
            Timeframe::Weekly => &mut self.weekly,
            Timeframe::Daily => &mut self.daily,
        }
    }

    /// Every goal, coarsest timeframe first.
    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        Timeframe::ALL.into_iter().flat_map(move |t| self.list(t).iter())
    }

    pub fn len(&self) -> usize {
        Timeframe::ALL.iter().map(|t| self.list(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a goal to the list for its timeframe, replacing any goal with the same id.
    pub fn insert(&mut self, goal: Goal) {
        if let Some(existing) = self.find_mut(&goal.id) {
            if existing.timeframe == goal.timeframe {
                *existing = goal;
                return;
            }
            let id = goal.id.clone();
            self.take(&id);
        }
        self.list_mut(goal.timeframe).push(goal);
    }

    pub fn find(&self, id: &str) -> Option<&Goal> {
        self.iter().find(|g| g.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Goal> {
        let timeframe = self.find(id)?.timeframe;
        self.list_mut(timeframe).iter_mut().find(|g| g.id == id)
    }

    fn take(&mut self, id: &str) -> Option<Goal> {
        let timeframe = self.find(id)?.timeframe;
        let list = self.list_mut(timeframe);
        let index = list.iter().position(|g| g.id == id)?;
        Some(list.remove(index))
    }

    /// Remove a goal, detaching it from its parent and orphaning its children.
    pub fn remove(&mut self, id: &str) -> Option<Goal> {
        let goal = self.take(id)?;
        if let Some(parent_id) = &goal.parent_goal_id {
            if let Some(parent) = self.find_mut(parent_id) {
                parent.child_goal_ids.retain(|c| c != id);
            }
        }
        for child_id in &goal.child_goal_ids {
            if let Some(child) = self.find_mut(child_id) {
                child.parent_goal_id = None;
            }
        }
        Some(goal)
    }

    /// Whether the loop already has an annual goal.
    pub fn has_annual_goal(&self, loop_id: LoopId) -> bool {
        self.annual.iter().any(|g| g.loop_id == loop_id)
    }

    /// Insert `children` under `parent_id`, linking both directions.
    ///
    /// # Errors
    /// Returns an error if the parent does not exist or a child's timeframe is
    /// not strictly finer than the parent's. Nothing is inserted on error.
    pub fn attach_children(
        &mut self,
        parent_id: &str,
        children: Vec<Goal>,
    ) -> Result<(), ValidationError> {
        let parent_timeframe = self
            .find(parent_id)
            .map(|p| p.timeframe)
            .ok_or_else(|| ValidationError::UnknownGoal(parent_id.to_string()))?;

        if let Some(child) = children
            .iter()
            .find(|c| !c.timeframe.is_finer_than(parent_timeframe))
        {
            return Err(ValidationError::TimeframeOrder {
                parent: parent_id.to_string(),
                parent_timeframe,
                child: child.id.clone(),
                child_timeframe: child.timeframe,
            });
        }

        let mut child_ids = Vec::with_capacity(children.len());
        for mut child in children {
            child.parent_goal_id = Some(parent_id.to_string());
            child_ids.push(child.id.clone());
            self.insert(child);
        }

        if let Some(parent) = self.find_mut(parent_id) {
            for id in child_ids {
                if !parent.child_goal_ids.contains(&id) {
                    parent.child_goal_ids.push(id);
                }
            }
        }
        Ok(())
    }

    /// Check every structural invariant of the hierarchy.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for timeframe in Timeframe::ALL {
            for goal in self.list(timeframe) {
                if goal.timeframe != timeframe {
                    return Err(ValidationError::MisplacedGoal {
                        id: goal.id.clone(),
                        actual: goal.timeframe,
                        listed: timeframe,
                    });
                }
                goal.validate_dates()?;
            }
        }

        for goal in self.iter() {
            if let Some(parent_id) = &goal.parent_goal_id {
                let parent = self
                    .find(parent_id)
                    .ok_or_else(|| ValidationError::UnknownGoal(parent_id.clone()))?;
                if !goal.timeframe.is_finer_than(parent.timeframe) {
                    return Err(ValidationError::TimeframeOrder {
                        parent: parent.id.clone(),
                        parent_timeframe: parent.timeframe,
                        child: goal.id.clone(),
                        child_timeframe: goal.timeframe,
                    });
                }
                if !parent.child_goal_ids.contains(&goal.id) {
                    return Err(ValidationError::InconsistentLink {
                        parent: parent.id.clone(),
                        child: goal.id.clone(),
                        message: "parent does not list child".to_string(),
                    });
                }
            }

            for child_id in &goal.child_goal_ids {
                let child = self
                    .find(child_id)
                    .ok_or_else(|| ValidationError::UnknownGoal(child_id.clone()))?;
                if child.parent_goal_id.as_deref() != Some(goal.id.as_str()) {
                    return Err(ValidationError::InconsistentLink {
                        parent: goal.id.clone(),
                        child: child.id.clone(),
                        message: "child points to a different parent".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
