//! Human-readable explanations for suggestion scores.

use crate::archetype::ArchetypeBlend;
use crate::directional::{DirectionalFacts, Season};
use crate::loops::{LoopId, LoopState};

use super::catalog::GoalTemplate;

/// Affinity at or above which a template is called out as an archetype fit.
pub const STRONG_AFFINITY: f64 = 0.8;

/// Ranks below this are mentioned in the reasoning.
const MENTIONED_PRIORITY_RANKS: usize = 3;

/// Satisfaction below this percent is mentioned in the reasoning.
const LOW_SATISFACTION: f64 = 50.0;

fn generic_sentence(loop_id: LoopId) -> &'static str {
    match loop_id {
        LoopId::Health => "Investing in your health pays off in every other loop",
        LoopId::Wealth => "Financial stability gives every other goal more room",
        LoopId::Family => "Time with the people closest to you compounds over years",
        LoopId::Work => "Focused progress at work builds options for the future",
        LoopId::Fun => "Play and novelty keep the rest of the system sustainable",
        LoopId::Maintenance => "A well-kept base frees attention for what matters",
        LoopId::Meaning => "A clear sense of purpose anchors every other loop",
        LoopId::Life => "A balanced goal that supports your whole life",
    }
}

fn directional_clauses(facts: &DirectionalFacts) -> Vec<String> {
    let loop_name = facts.loop_id;
    let mut clauses = Vec::new();

    if let Some(rank) = facts.priority_rank.filter(|r| *r < MENTIONED_PRIORITY_RANKS) {
        clauses.push(format!("{loop_name} is your #{} priority", rank + 1));
    }
    if let Some(satisfaction) = facts.satisfaction.filter(|s| *s < LOW_SATISFACTION) {
        clauses.push(format!(
            "Your satisfaction with {loop_name} is only {}%",
            satisfaction.round()
        ));
    }
    if let Some((current, desired)) = facts.allocation.filter(|(c, d)| d > c) {
        clauses.push(format!(
            "You want to grow {loop_name} from {}% to {}% of your time",
            current.round(),
            desired.round()
        ));
    }
    match facts.season {
        Some(Season::Building) => clauses.push(format!("You're in a building season for {loop_name}")),
        Some(Season::Recovering) => clauses.push(format!("{loop_name} is in a recovery season")),
        Some(Season::Hibernating) => clauses.push(format!("{loop_name} is hibernating this season")),
        Some(Season::Maintaining) | None => {}
    }
    clauses
}

fn archetype_clause(template: &GoalTemplate, blend: Option<&ArchetypeBlend>) -> Option<String> {
    let blend = blend?;
    let primary = blend.primary.archetype;
    let secondary = blend.secondary.archetype;

    if template.affinity(primary) >= STRONG_AFFINITY {
        Some(format!("Strong fit for your {primary} archetype"))
    } else if template.affinity(secondary) >= STRONG_AFFINITY {
        Some(format!("Plays to your secondary {secondary} side"))
    } else {
        None
    }
}

fn state_clause(loop_id: LoopId, state: LoopState) -> Option<String> {
    match state {
        LoopState::Build => Some(format!("{loop_id} is in BUILD mode, a good time to stretch")),
        LoopState::Maintain => None,
        LoopState::Recover => Some(format!("{loop_id} is recovering, so keep the pace gentle")),
        LoopState::Hibernate => Some(format!("{loop_id} is hibernating; treat this as optional")),
    }
}

/// Explain why a template was suggested.
///
/// Directional clauses come first, then the archetype clause (or a generic
/// sentence for the template's loop), then a clause for non-MAINTAIN states.
/// Clauses are joined with ". " and the result ends with a period.
pub fn generate_reasoning(
    template: &GoalTemplate,
    blend: Option<&ArchetypeBlend>,
    state: LoopState,
    facts: Option<&DirectionalFacts>,
) -> String {
    let mut clauses = facts.map(directional_clauses).unwrap_or_default();
    clauses.push(
        archetype_clause(template, blend)
            .unwrap_or_else(|| generic_sentence(template.loop_id).to_string()),
    );
    clauses.extend(state_clause(template.loop_id, state));

    let mut reasoning = clauses.join(". ");
    reasoning.push('.');
    reasoning
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::{Archetype, UserPrototype};
    use crate::directional::{DirectionalDocument, DocumentStatus, LoopDirection};
    use crate::suggest::find_template;
    use std::collections::HashMap;

    fn blend(primary: Archetype, secondary: Archetype) -> ArchetypeBlend {
        UserPrototype {
            primary: Some(primary),
            secondary: Some(secondary),
            tertiary: None,
            scores: HashMap::from([(primary, 60.0), (secondary, 40.0)]),
        }
        .blend()
        .unwrap()
    }

    #[test]
    fn primary_fit_with_build_state() {
        let template = find_template("health_fitness_transform").unwrap();
        let b = blend(Archetype::Machine, Archetype::Scientist);
        let text = generate_reasoning(template, Some(&b), LoopState::Build, None);
        assert_eq!(
            text,
            "Strong fit for your Machine archetype. Health is in BUILD mode, a good time to stretch."
        );
    }

    #[test]
    fn secondary_fit_when_primary_is_weak() {
        let template = find_template("work_skill_mastery").unwrap();
        let b = blend(Archetype::Caregiver, Archetype::Scientist);
        let text = generate_reasoning(template, Some(&b), LoopState::Maintain, None);
        assert_eq!(text, "Plays to your secondary Scientist side.");
    }

    #[test]
    fn generic_sentence_without_blend() {
        let template = find_template("fun_adventure_trip").unwrap();
        let text = generate_reasoning(template, None, LoopState::Hibernate, None);
        assert!(text.starts_with("Play and novelty"));
        assert!(text.ends_with("Fun is hibernating; treat this as optional."));
    }

    #[test]
    fn generic_sentence_when_no_affinity_crosses_threshold() {
        let template = find_template("family_weekly_date").unwrap();
        let b = blend(Archetype::Machine, Archetype::Warrior);
        let text = generate_reasoning(template, Some(&b), LoopState::Maintain, None);
        assert_eq!(text, "Time with the people closest to you compounds over years.");
    }

    #[test]
    fn directional_clauses_come_first() {
        let template = find_template("wealth_emergency_fund").unwrap();
        let doc = DirectionalDocument {
            status: DocumentStatus::Active,
            loops: HashMap::from([(
                LoopId::Wealth,
                LoopDirection {
                    desired_allocation: 20.0,
                    current_allocation: 10.0,
                    current_satisfaction: 30.0,
                    season: crate::directional::Season::Building,
                },
            )]),
            priority_ranking: vec![LoopId::Wealth],
            updated_at: None,
        };
        let facts = doc.facts_for(LoopId::Wealth);
        let b = blend(Archetype::Stoic, Archetype::Artist);
        let text = generate_reasoning(template, Some(&b), LoopState::Maintain, Some(&facts));
        assert_eq!(
            text,
            "Wealth is your #1 priority. Your satisfaction with Wealth is only 30%. \
             You want to grow Wealth from 10% to 20% of your time. \
             You're in a building season for Wealth. Strong fit for your Stoic archetype."
        );
    }

    #[test]
    fn reasoning_is_deterministic() {
        let template = find_template("meaning_read_books").unwrap();
        let b = blend(Archetype::Scientist, Archetype::Stoic);
        let a = generate_reasoning(template, Some(&b), LoopState::Recover, None);
        let c = generate_reasoning(template, Some(&b), LoopState::Recover, None);
        assert_eq!(a, c);
    }
}
