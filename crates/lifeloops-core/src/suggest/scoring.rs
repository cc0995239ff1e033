//! Relevance scoring for goal templates.
//!
//! ```text
//! score = clamp(base * state_multiplier + directional, 0, 100)
//! ```
//!
//! | Input                          | Base                                   |
//! |--------------------------------|----------------------------------------|
//! | Blend, loop uncovered          | Σ affinity × percent/100 × weight × 100 |
//! | Blend, loop has annual goal    | Σ affinity × percent/100 × weight × 100 |
//! | No blend, loop uncovered       | 50                                     |
//! | No blend, loop has annual goal | 20                                     |

use serde::Serialize;

use crate::archetype::ArchetypeBlend;
use crate::directional::{DirectionalDocument, DirectionalFacts};
use crate::goals::GoalHierarchy;
use crate::loops::{state_for, LoopState, LoopStates};

use super::catalog::GoalTemplate;

/// Base score when no archetype blend is available.
pub const NEUTRAL_BASE_SCORE: f64 = 50.0;
/// Base score without a blend when the loop already has an annual goal.
pub const COVERED_LOOP_BASE_SCORE: f64 = 20.0;

/// Where the base score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseSource {
    /// Weighted archetype affinities.
    Blend,
    /// Neutral default, no usable blend.
    Neutral,
}

/// Full arithmetic behind one template's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub base_source: BaseSource,
    /// The template's loop already has an annual goal.
    pub loop_covered: bool,
    pub state: LoopState,
    pub state_multiplier: f64,
    /// Present only when an active directional document was supplied.
    pub directional: Option<DirectionalFacts>,
    pub directional_total: i32,
    /// Score before clamping and rounding.
    pub raw: f64,
    pub score: u8,
}

/// Base score before state and directional adjustments.
///
/// Loop coverage only matters without a blend.
pub fn base_score(template: &GoalTemplate, blend: Option<&ArchetypeBlend>, loop_covered: bool) -> f64 {
    match blend {
        Some(blend) => {
            let weighted: f64 = blend
                .slots()
                .map(|(slot, weight)| template.affinity(slot.archetype) * (slot.percent / 100.0) * weight)
                .sum();
            weighted * 100.0
        }
        None if loop_covered => COVERED_LOOP_BASE_SCORE,
        None => NEUTRAL_BASE_SCORE,
    }
}

/// Clamp to [0, 100] and round to an integer.
pub fn finalize(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Score one template. `directional` must already be filtered to active documents.
pub fn score_template(
    template: &GoalTemplate,
    blend: Option<&ArchetypeBlend>,
    loop_states: &LoopStates,
    existing_goals: &GoalHierarchy,
    directional: Option<&DirectionalDocument>,
) -> ScoreBreakdown {
    let loop_covered = existing_goals.has_annual_goal(template.loop_id);
    let base = base_score(template, blend, loop_covered);
    let state = state_for(loop_states, template.loop_id);
    let state_multiplier = state.multiplier();

    let facts = directional.map(|doc| doc.facts_for(template.loop_id));
    let directional_total = facts.as_ref().map(DirectionalFacts::total).unwrap_or(0);

    let raw = base * state_multiplier + f64::from(directional_total);
    let score = finalize(raw);

    tracing::debug!(
        template = template.id,
        base,
        multiplier = state_multiplier,
        directional = directional_total,
        score,
        "scored goal template"
    );

    ScoreBreakdown {
        base,
        base_source: if blend.is_some() {
            BaseSource::Blend
        } else {
            BaseSource::Neutral
        },
        loop_covered,
        state,
        state_multiplier,
        directional: facts,
        directional_total,
        raw,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::{Archetype, UserPrototype};
    use crate::directional::{DocumentStatus, LoopDirection, Season};
    use crate::goals::{tests::goal, Timeframe};
    use crate::loops::LoopId;
    use crate::suggest::find_template;
    use std::collections::HashMap;

    fn machine_scientist() -> ArchetypeBlend {
        UserPrototype {
            primary: Some(Archetype::Machine),
            secondary: Some(Archetype::Scientist),
            tertiary: None,
            scores: HashMap::from([(Archetype::Machine, 70.0), (Archetype::Scientist, 30.0)]),
        }
        .blend()
        .unwrap()
    }

    fn states(loop_id: LoopId, state: LoopState) -> LoopStates {
        HashMap::from([(loop_id, state)])
    }

    #[test]
    fn machine_fitness_reference_value() {
        let template = find_template("health_fitness_transform").unwrap();
        let blend = machine_scientist();
        let breakdown = score_template(
            template,
            Some(&blend),
            &states(LoopId::Health, LoopState::Build),
            &GoalHierarchy::new(),
            None,
        );
        assert!((breakdown.base - 31.5).abs() < 1e-9);
        assert!((breakdown.raw - 40.95).abs() < 1e-9);
        assert_eq!(breakdown.score, 41);
        assert_eq!(breakdown.base_source, BaseSource::Blend);
    }

    #[test]
    fn tertiary_contributes_fifteen_percent() {
        let template = find_template("meaning_daily_reflection").unwrap();
        let blend = UserPrototype {
            primary: Some(Archetype::Machine),
            secondary: Some(Archetype::Warrior),
            tertiary: Some(Archetype::Stoic),
            scores: HashMap::from([(Archetype::Stoic, 100.0)]),
        }
        .blend()
        .unwrap();
        // Stoic affinity 0.95 * 1.0 * 0.15 * 100
        assert!((base_score(template, Some(&blend), false) - 14.25).abs() < 1e-9);
    }

    #[test]
    fn neutral_base_without_blend() {
        let template = find_template("wealth_side_income").unwrap();
        assert_eq!(base_score(template, None, false), 50.0);
        assert_eq!(base_score(template, None, true), 20.0);
    }

    #[test]
    fn covered_loop_keeps_blended_base() {
        let template = find_template("health_fitness_transform").unwrap();
        let blend = machine_scientist();
        let mut goals = GoalHierarchy::new();
        goals.insert(goal("existing", LoopId::Health, Timeframe::Annual));

        let breakdown = score_template(
            template,
            Some(&blend),
            &states(LoopId::Health, LoopState::Build),
            &goals,
            None,
        );
        assert!(breakdown.loop_covered);
        assert!((breakdown.base - 31.5).abs() < 1e-9);
        assert_eq!(breakdown.score, 41);
    }

    #[test]
    fn non_annual_goals_do_not_cover_a_loop() {
        let template = find_template("health_fitness_transform").unwrap();
        let mut goals = GoalHierarchy::new();
        goals.insert(goal("monthly", LoopId::Health, Timeframe::Monthly));
        let breakdown = score_template(template, None, &LoopStates::new(), &goals, None);
        assert!(!breakdown.loop_covered);
        assert_eq!(breakdown.base, 50.0);
    }

    #[test]
    fn missing_state_scores_as_maintain() {
        let template = find_template("fun_creative_hobby").unwrap();
        let breakdown = score_template(template, None, &LoopStates::new(), &GoalHierarchy::new(), None);
        assert_eq!(breakdown.state, LoopState::Maintain);
        assert_eq!(breakdown.score, 55);
    }

    #[test]
    fn directional_terms_are_additive_and_clamped() {
        let template = find_template("wealth_side_income").unwrap();
        let doc = DirectionalDocument {
            status: DocumentStatus::Active,
            loops: HashMap::from([(
                LoopId::Wealth,
                LoopDirection {
                    desired_allocation: 40.0,
                    current_allocation: 10.0,
                    current_satisfaction: 20.0,
                    season: Season::Building,
                },
            )]),
            priority_ranking: vec![LoopId::Wealth],
            updated_at: None,
        };
        let breakdown = score_template(
            template,
            None,
            &states(LoopId::Wealth, LoopState::Build),
            &GoalHierarchy::new(),
            Some(&doc),
        );
        // 28 + 16 + 9 + 10
        assert_eq!(breakdown.directional_total, 63);
        assert!((breakdown.raw - 128.0).abs() < 1e-9);
        assert_eq!(breakdown.score, 100);
    }

    #[test]
    fn negative_raw_clamps_to_zero() {
        assert_eq!(finalize(-12.4), 0);
        assert_eq!(finalize(f64::NAN), 0);
        assert_eq!(finalize(49.5), 50);
        assert_eq!(finalize(250.0), 100);
    }
}
