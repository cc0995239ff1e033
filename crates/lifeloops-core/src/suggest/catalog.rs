//! Static catalog of goal templates.
//!
//! Catalog order is significant: it breaks ties between equally scored
//! templates, and each template records its position in `order`.

use serde::Serialize;

use crate::archetype::Archetype;
use crate::goals::Timeframe;
use crate::loops::LoopId;

/// A metric suggested alongside a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuggestedMetric {
    pub name: &'static str,
    pub unit: &'static str,
    pub target: f64,
}

/// An immutable goal template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalTemplate {
    pub id: &'static str,
    /// Position in the catalog, used for stable tie-breaking.
    pub order: u16,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "loop")]
    pub loop_id: LoopId,
    pub timeframe: Timeframe,
    /// Affinity in [0, 1] per archetype; unlisted archetypes have 0.
    pub affinities: &'static [(Archetype, f64)],
    pub suggested_metrics: &'static [SuggestedMetric],
}

impl GoalTemplate {
    pub fn affinity(&self, archetype: Archetype) -> f64 {
        self.affinities
            .iter()
            .find(|(a, _)| *a == archetype)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

use Archetype::*;

const fn metric(name: &'static str, unit: &'static str, target: f64) -> SuggestedMetric {
    SuggestedMetric { name, unit, target }
}

pub static CATALOG: &[GoalTemplate] = &[
    // Health
    GoalTemplate {
        id: "health_fitness_transform",
        order: 0,
        title: "Transform Your Fitness",
        description: "Commit to a year of structured training and measurable strength and conditioning gains.",
        loop_id: LoopId::Health,
        timeframe: Timeframe::Annual,
        affinities: &[(Machine, 0.9), (Warrior, 0.85), (Explorer, 0.5)],
        suggested_metrics: &[metric("Workouts per week", "sessions", 4.0)],
    },
    GoalTemplate {
        id: "health_sleep_consistency",
        order: 1,
        title: "Master Your Sleep",
        description: "Hold a consistent bedtime and wake time so recovery stops being left to chance.",
        loop_id: LoopId::Health,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Machine, 0.8), (Scientist, 0.7), (Stoic, 0.6)],
        suggested_metrics: &[metric("Nights with 7+ hours", "nights/week", 6.0)],
    },
    GoalTemplate {
        id: "health_nutrition_reset",
        order: 2,
        title: "Reset Your Nutrition",
        description: "Track what you eat for a quarter and rebuild meals around whole foods.",
        loop_id: LoopId::Health,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Scientist, 0.8), (Machine, 0.6), (Caregiver, 0.4)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "health_daily_movement",
        order: 3,
        title: "Move Every Day",
        description: "Build a floor of daily movement that survives busy weeks.",
        loop_id: LoopId::Health,
        timeframe: Timeframe::Monthly,
        affinities: &[(Warrior, 0.7), (Explorer, 0.6), (Stoic, 0.5)],
        suggested_metrics: &[metric("Daily steps", "steps", 8000.0)],
    },
    // Wealth
    GoalTemplate {
        id: "wealth_emergency_fund",
        order: 4,
        title: "Build a 6-Month Emergency Fund",
        description: "Set aside six months of essential expenses in an easily reachable account.",
        loop_id: LoopId::Wealth,
        timeframe: Timeframe::Annual,
        affinities: &[(Machine, 0.8), (Stoic, 0.8), (Caregiver, 0.6)],
        suggested_metrics: &[metric("Expenses covered", "months", 6.0)],
    },
    GoalTemplate {
        id: "wealth_debt_payoff",
        order: 5,
        title: "Eliminate Consumer Debt",
        description: "Pay off every credit card and consumer loan balance this year.",
        loop_id: LoopId::Wealth,
        timeframe: Timeframe::Annual,
        affinities: &[(Warrior, 0.8), (Machine, 0.7), (Stoic, 0.6)],
        suggested_metrics: &[metric("Debt remaining", "USD", 0.0)],
    },
    GoalTemplate {
        id: "wealth_side_income",
        order: 6,
        title: "Launch a Side Income Stream",
        description: "Turn a skill or idea into a second, independent source of income.",
        loop_id: LoopId::Wealth,
        timeframe: Timeframe::Annual,
        affinities: &[(Entrepreneur, 0.95), (Explorer, 0.6), (Artist, 0.5)],
        suggested_metrics: &[metric("Monthly side revenue", "USD", 1000.0)],
    },
    GoalTemplate {
        id: "wealth_budget_review",
        order: 7,
        title: "Run a Monthly Budget Review",
        description: "Close out each month by reconciling spending against the plan.",
        loop_id: LoopId::Wealth,
        timeframe: Timeframe::Monthly,
        affinities: &[(Scientist, 0.8), (Machine, 0.75)],
        suggested_metrics: &[],
    },
    // Family
    GoalTemplate {
        id: "family_weekly_date",
        order: 8,
        title: "Weekly Date Night",
        description: "Protect one evening a week for your partner, phones away.",
        loop_id: LoopId::Family,
        timeframe: Timeframe::Weekly,
        affinities: &[(Caregiver, 0.9), (Artist, 0.5)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "family_one_on_one",
        order: 9,
        title: "One-on-One Time with Each Kid",
        description: "Spend dedicated time alone with each child every month.",
        loop_id: LoopId::Family,
        timeframe: Timeframe::Monthly,
        affinities: &[(Caregiver, 0.95), (Stoic, 0.4)],
        suggested_metrics: &[metric("Outings per child", "outings", 1.0)],
    },
    GoalTemplate {
        id: "family_tradition",
        order: 10,
        title: "Start a Family Tradition",
        description: "Create a ritual your family will look forward to every year.",
        loop_id: LoopId::Family,
        timeframe: Timeframe::Annual,
        affinities: &[(Caregiver, 0.8), (Artist, 0.7), (Explorer, 0.5)],
        suggested_metrics: &[],
    },
    // Work
    GoalTemplate {
        id: "work_promotion",
        order: 11,
        title: "Earn a Promotion",
        description: "Make the case for the next level with visible, documented impact.",
        loop_id: LoopId::Work,
        timeframe: Timeframe::Annual,
        affinities: &[(Warrior, 0.8), (Machine, 0.8), (Entrepreneur, 0.6)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "work_skill_mastery",
        order: 12,
        title: "Master a Core Skill",
        description: "Pick one skill that compounds in your field and study it deliberately.",
        loop_id: LoopId::Work,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Scientist, 0.9), (Machine, 0.7), (Artist, 0.4)],
        suggested_metrics: &[metric("Practice hours", "hours", 60.0)],
    },
    GoalTemplate {
        id: "work_deep_work",
        order: 13,
        title: "Protect Deep Work Blocks",
        description: "Reserve uninterrupted focus time on the calendar every week.",
        loop_id: LoopId::Work,
        timeframe: Timeframe::Weekly,
        affinities: &[(Machine, 0.85), (Scientist, 0.7), (Stoic, 0.6)],
        suggested_metrics: &[metric("Deep work", "hours/week", 10.0)],
    },
    GoalTemplate {
        id: "work_ship_project",
        order: 14,
        title: "Ship a Signature Project",
        description: "Own a project end to end and get it into users' hands this quarter.",
        loop_id: LoopId::Work,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Entrepreneur, 0.85), (Warrior, 0.7), (Artist, 0.6)],
        suggested_metrics: &[],
    },
    // Fun
    GoalTemplate {
        id: "fun_adventure_trip",
        order: 15,
        title: "Plan an Adventure Trip",
        description: "Go somewhere new that stretches you, and put it on the calendar now.",
        loop_id: LoopId::Fun,
        timeframe: Timeframe::Annual,
        affinities: &[(Explorer, 0.95), (Warrior, 0.5), (Artist, 0.4)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "fun_creative_hobby",
        order: 16,
        title: "Pick Up a Creative Hobby",
        description: "Make something with your hands or voice purely for the joy of it.",
        loop_id: LoopId::Fun,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Artist, 0.9), (Explorer, 0.6)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "fun_weekly_play",
        order: 17,
        title: "Schedule Weekly Play",
        description: "Block unstructured time for games, sport, or anything that feels like play.",
        loop_id: LoopId::Fun,
        timeframe: Timeframe::Weekly,
        affinities: &[(Explorer, 0.7), (Artist, 0.6), (Caregiver, 0.5)],
        suggested_metrics: &[],
    },
    // Maintenance
    GoalTemplate {
        id: "maintenance_declutter",
        order: 18,
        title: "Declutter Your Home",
        description: "Work room by room until everything you own has a place.",
        loop_id: LoopId::Maintenance,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Stoic, 0.85), (Machine, 0.7)],
        suggested_metrics: &[metric("Rooms finished", "rooms", 6.0)],
    },
    GoalTemplate {
        id: "maintenance_admin_zero",
        order: 19,
        title: "Reach Admin Inbox Zero",
        description: "Clear the backlog of bills, forms, and paperwork and keep it clear.",
        loop_id: LoopId::Maintenance,
        timeframe: Timeframe::Monthly,
        affinities: &[(Machine, 0.9), (Stoic, 0.6)],
        suggested_metrics: &[],
    },
    GoalTemplate {
        id: "maintenance_home_projects",
        order: 20,
        title: "Finish Deferred Home Projects",
        description: "Close out the repairs and upgrades that keep getting postponed.",
        loop_id: LoopId::Maintenance,
        timeframe: Timeframe::Annual,
        affinities: &[(Warrior, 0.6), (Machine, 0.6), (Entrepreneur, 0.5)],
        suggested_metrics: &[metric("Projects completed", "projects", 5.0)],
    },
    // Meaning
    GoalTemplate {
        id: "meaning_daily_reflection",
        order: 21,
        title: "Daily Reflection Practice",
        description: "Spend a few minutes each day journaling, meditating, or praying.",
        loop_id: LoopId::Meaning,
        timeframe: Timeframe::Daily,
        affinities: &[(Stoic, 0.95), (Scientist, 0.5), (Artist, 0.5)],
        suggested_metrics: &[metric("Reflection", "minutes", 10.0)],
    },
    GoalTemplate {
        id: "meaning_volunteer",
        order: 22,
        title: "Volunteer Regularly",
        description: "Give time every month to a cause you care about.",
        loop_id: LoopId::Meaning,
        timeframe: Timeframe::Monthly,
        affinities: &[(Caregiver, 0.85), (Stoic, 0.6)],
        suggested_metrics: &[metric("Volunteer hours", "hours", 4.0)],
    },
    GoalTemplate {
        id: "meaning_read_books",
        order: 23,
        title: "Read 24 Books",
        description: "Read two books a month across fiction, philosophy, and your craft.",
        loop_id: LoopId::Meaning,
        timeframe: Timeframe::Annual,
        affinities: &[(Scientist, 0.85), (Stoic, 0.7), (Artist, 0.6)],
        suggested_metrics: &[metric("Books read", "books", 24.0)],
    },
    GoalTemplate {
        id: "meaning_personal_mission",
        order: 24,
        title: "Write a Personal Mission Statement",
        description: "Put into words what you are for, and revisit it every quarter.",
        loop_id: LoopId::Meaning,
        timeframe: Timeframe::Quarterly,
        affinities: &[(Stoic, 0.8), (Artist, 0.7), (Entrepreneur, 0.5)],
        suggested_metrics: &[],
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static GoalTemplate> {
    CATALOG.iter().find(|t| t.id == id)
}

/// Templates targeting `loop_id`, in catalog order.
pub fn templates_for_loop(loop_id: LoopId) -> impl Iterator<Item = &'static GoalTemplate> {
    CATALOG.iter().filter(move |t| t.loop_id == loop_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_matches_position() {
        for (i, template) in CATALOG.iter().enumerate() {
            assert_eq!(template.order as usize, i, "{} out of order", template.id);
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn affinities_are_unit_interval() {
        for template in CATALOG {
            for (archetype, value) in template.affinities {
                assert!(
                    (0.0..=1.0).contains(value),
                    "{} has affinity {} for {}",
                    template.id,
                    value,
                    archetype
                );
            }
        }
    }

    #[test]
    fn every_life_loop_has_templates() {
        for loop_id in LoopId::LIFE_LOOPS {
            assert!(templates_for_loop(loop_id).count() > 0, "no templates for {loop_id}");
        }
        assert_eq!(templates_for_loop(LoopId::Life).count(), 0);
    }

    #[test]
    fn unlisted_archetype_has_zero_affinity() {
        let template = find_template("health_fitness_transform").unwrap();
        assert_eq!(template.affinity(Archetype::Machine), 0.9);
        assert_eq!(template.affinity(Archetype::Scientist), 0.0);
    }
}
