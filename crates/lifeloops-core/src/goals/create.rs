//! Turning catalog templates into concrete goals.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::{Goal, GoalMetric, GoalStatus, Timeframe};
use crate::suggest::GoalTemplate;

/// First day of `month` in `year`.
pub(crate) fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of `month` in `year`.
pub(crate) fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    month_start(next_year, next_month)?.pred_opt()
}

/// Last day of the period of `timeframe` that contains `date`.
///
/// Weekly periods run for seven days starting at `date`; daily periods end on
/// `date` itself.
pub fn period_end(timeframe: Timeframe, date: NaiveDate) -> NaiveDate {
    let end = match timeframe {
        Timeframe::Annual => month_end(date.year(), 12),
        Timeframe::Quarterly => {
            let last_month = ((date.month() - 1) / 3 + 1) * 3;
            month_end(date.year(), last_month)
        }
        Timeframe::Monthly => month_end(date.year(), date.month()),
        Timeframe::Weekly => date.checked_add_signed(Duration::days(6)),
        Timeframe::Daily => Some(date),
    };
    end.unwrap_or(date)
}

/// Build a new active goal from a template, starting today.
///
/// Suggested metrics become goal metrics with a current value of 0. The caller
/// is responsible for persisting the goal.
pub fn goal_from_template(template: &GoalTemplate, now: DateTime<Utc>) -> Goal {
    let today = now.date_naive();
    Goal {
        id: Uuid::new_v4().to_string(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        loop_id: template.loop_id,
        timeframe: template.timeframe,
        parent_goal_id: None,
        child_goal_ids: Vec::new(),
        status: GoalStatus::Active,
        progress: 0,
        start_date: today,
        target_date: period_end(template.timeframe, today),
        metrics: template
            .suggested_metrics
            .iter()
            .map(|m| GoalMetric {
                name: m.name.to_string(),
                unit: m.unit.to_string(),
                current: 0.0,
                target: m.target,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}
