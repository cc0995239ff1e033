//! Goal-suggestion engine.
//!
//! Ranks the template catalog for a user given their archetype blend, the
//! capacity state of each loop, the goals they already have, and an optional
//! directional document. Pure and deterministic: identical inputs yield
//! identical suggestions, reasoning included.

mod catalog;
mod reasoning;
mod scoring;

pub use catalog::{find_template, templates_for_loop, GoalTemplate, SuggestedMetric, CATALOG};
pub use reasoning::{generate_reasoning, STRONG_AFFINITY};
pub use scoring::{
    base_score, finalize, score_template, BaseSource, ScoreBreakdown, COVERED_LOOP_BASE_SCORE,
    NEUTRAL_BASE_SCORE,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::archetype::UserPrototype;
use crate::directional::DirectionalDocument;
use crate::goals::{goal_from_template, Goal, GoalHierarchy};
use crate::loops::LoopStates;

/// A ranked template with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSuggestion<'a> {
    pub template: &'a GoalTemplate,
    /// 0-100.
    pub relevance_score: u8,
    pub reasoning: String,
    pub breakdown: ScoreBreakdown,
}

impl GoalSuggestion<'_> {
    /// Create the goal the user adopts from this suggestion.
    pub fn to_goal(&self, now: DateTime<Utc>) -> Goal {
        goal_from_template(self.template, now)
    }
}

/// Rank the built-in catalog and return the top `count` suggestions.
pub fn generate_goal_suggestions(
    prototype: &UserPrototype,
    loop_states: &LoopStates,
    existing_goals: &GoalHierarchy,
    directional: Option<&DirectionalDocument>,
    count: usize,
) -> Vec<GoalSuggestion<'static>> {
    generate_goal_suggestions_from(CATALOG, prototype, loop_states, existing_goals, directional, count)
}

/// Rank `catalog` and return the top `count` suggestions.
///
/// Results are sorted by descending score with ties broken by each
/// template's catalog `order`. Draft directional documents are ignored.
pub fn generate_goal_suggestions_from<'a>(
    catalog: &'a [GoalTemplate],
    prototype: &UserPrototype,
    loop_states: &LoopStates,
    existing_goals: &GoalHierarchy,
    directional: Option<&DirectionalDocument>,
    count: usize,
) -> Vec<GoalSuggestion<'a>> {
    if count == 0 {
        return Vec::new();
    }

    let blend = prototype.blend();
    let directional = directional.filter(|doc| doc.is_active());

    let mut suggestions: Vec<GoalSuggestion<'a>> = catalog
        .iter()
        .map(|template| {
            let breakdown =
                score_template(template, blend.as_ref(), loop_states, existing_goals, directional);
            let reasoning = generate_reasoning(
                template,
                blend.as_ref(),
                breakdown.state,
                breakdown.directional.as_ref(),
            );
            GoalSuggestion {
                template,
                relevance_score: breakdown.score,
                reasoning,
                breakdown,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then(a.template.order.cmp(&b.template.order))
    });
    suggestions.truncate(count);

    tracing::debug!(
        returned = suggestions.len(),
        has_blend = blend.is_some(),
        has_direction = directional.is_some(),
        "generated goal suggestions"
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::directional::{DocumentStatus, LoopDirection, Season};
    use crate::loops::{LoopId, LoopState};
    use std::collections::HashMap;

    fn prototype() -> UserPrototype {
        UserPrototype {
            primary: Some(Archetype::Machine),
            secondary: Some(Archetype::Scientist),
            tertiary: None,
            scores: HashMap::from([(Archetype::Machine, 70.0), (Archetype::Scientist, 30.0)]),
        }
    }

    #[test]
    fn zero_count_returns_nothing() {
        let result = generate_goal_suggestions(
            &prototype(),
            &LoopStates::new(),
            &GoalHierarchy::new(),
            None,
            0,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn count_is_capped_by_catalog_size() {
        let result = generate_goal_suggestions(
            &prototype(),
            &LoopStates::new(),
            &GoalHierarchy::new(),
            None,
            500,
        );
        assert_eq!(result.len(), CATALOG.len());
    }

    #[test]
    fn ties_fall_back_to_catalog_order() {
        // Without a blend every template in a MAINTAIN loop scores 55.
        let result = generate_goal_suggestions(
            &UserPrototype::default(),
            &LoopStates::new(),
            &GoalHierarchy::new(),
            None,
            CATALOG.len(),
        );
        let orders: Vec<u16> = result.iter().map(|s| s.template.order).collect();
        let expected: Vec<u16> = (0..CATALOG.len() as u16).collect();
        assert_eq!(orders, expected);
        assert!(result.iter().all(|s| s.relevance_score == 55));
    }

    #[test]
    fn build_state_lifts_a_loop_to_the_top() {
        let states = HashMap::from([(LoopId::Fun, LoopState::Build)]);
        let result = generate_goal_suggestions(
            &UserPrototype::default(),
            &states,
            &GoalHierarchy::new(),
            None,
            3,
        );
        assert!(result.iter().all(|s| s.template.loop_id == LoopId::Fun));
        assert!(result.iter().all(|s| s.relevance_score == 65));
    }

    #[test]
    fn draft_directional_document_is_ignored() {
        let mut doc = DirectionalDocument {
            status: DocumentStatus::Draft,
            loops: HashMap::from([(
                LoopId::Meaning,
                LoopDirection {
                    desired_allocation: 30.0,
                    current_allocation: 5.0,
                    current_satisfaction: 10.0,
                    season: Season::Building,
                },
            )]),
            priority_ranking: vec![LoopId::Meaning],
            updated_at: None,
        };

        let states = LoopStates::new();
        let goals = GoalHierarchy::new();
        let without = generate_goal_suggestions(&prototype(), &states, &goals, None, 5);
        let draft = generate_goal_suggestions(&prototype(), &states, &goals, Some(&doc), 5);
        assert_eq!(without, draft);

        doc.status = DocumentStatus::Active;
        let active = generate_goal_suggestions(&prototype(), &states, &goals, Some(&doc), 5);
        assert_eq!(active[0].template.loop_id, LoopId::Meaning);
        assert!(active[0].reasoning.starts_with("Meaning is your #1 priority"));
    }

    #[test]
    fn suggestion_converts_to_goal() {
        let result = generate_goal_suggestions(
            &prototype(),
            &LoopStates::new(),
            &GoalHierarchy::new(),
            None,
            1,
        );
        let now = chrono::Utc::now();
        let goal = result[0].to_goal(now);
        assert_eq!(goal.title, result[0].template.title);
        assert_eq!(goal.created_at, now);
    }
}
