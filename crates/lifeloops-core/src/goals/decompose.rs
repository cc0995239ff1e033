//! Expanding a goal into time-boxed child goals on calendar boundaries.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use super::create::{month_end, month_start};
use super::{Goal, GoalStatus, Timeframe};

fn child_goal(
    parent: &Goal,
    timeframe: Timeframe,
    title: String,
    description: String,
    start_date: NaiveDate,
    target_date: NaiveDate,
    now: DateTime<Utc>,
) -> Goal {
    Goal {
        id: Uuid::new_v4().to_string(),
        title,
        description,
        loop_id: parent.loop_id,
        timeframe,
        parent_goal_id: Some(parent.id.clone()),
        child_goal_ids: Vec::new(),
        status: GoalStatus::Active,
        progress: 0,
        start_date,
        target_date,
        metrics: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn warn_on_mismatch(goal: &Goal, expected: Timeframe) {
    if goal.timeframe != expected {
        tracing::warn!(
            goal_id = %goal.id,
            timeframe = %goal.timeframe,
            expected = %expected,
            "decomposing goal with unexpected timeframe"
        );
    }
}

/// Split a goal into four quarterly goals.
///
/// Quarters are Jan-Mar, Apr-Jun, Jul-Sep and Oct-Dec of the calendar year
/// containing `now`, regardless of the goal's own start date. The goal's
/// timeframe is not checked.
pub fn decompose_annual_to_quarterly(goal: &Goal, now: DateTime<Utc>) -> Vec<Goal> {
    warn_on_mismatch(goal, Timeframe::Annual);
    let year = now.year();

    let children: Vec<Goal> = (0..4u32)
        .filter_map(|q| {
            let first_month = q * 3 + 1;
            let start = month_start(year, first_month)?;
            let end = month_end(year, first_month + 2)?;
            Some(child_goal(
                goal,
                Timeframe::Quarterly,
                format!("Q{} {}: {}", q + 1, year, goal.title),
                format!(
                    "Quarterly milestone for \"{}\". Describe what progress looks like by {}.",
                    goal.title,
                    end.format("%B %-d")
                ),
                start,
                end,
                now,
            ))
        })
        .collect();

    tracing::info!(
        goal_id = %goal.id,
        year,
        count = children.len(),
        "decomposed goal into quarters"
    );
    children
}

/// Month count above which decomposition logs a warning.
pub(crate) const MONTHLY_SPAN_WARNING: i64 = 12;

/// Calendar months touched by `start..=target`, 0 when the range is inverted.
pub(crate) fn month_span(start: NaiveDate, target: NaiveDate) -> i64 {
    if target < start {
        return 0;
    }
    i64::from(target.year() - start.year()) * 12 + i64::from(target.month())
        - i64::from(start.month())
        + 1
}

/// Split a goal into one monthly goal per calendar month it spans.
///
/// Months are walked from the month of `start_date` through the month of
/// `target_date` inclusive; a target before the start yields no children.
/// The goal's timeframe is not checked. The range is not capped either, so
/// callers should keep it valid; spans over a year are logged.
pub fn decompose_quarterly_to_monthly(goal: &Goal, now: DateTime<Utc>) -> Vec<Goal> {
    warn_on_mismatch(goal, Timeframe::Quarterly);
    let span = month_span(goal.start_date, goal.target_date);
    if span > MONTHLY_SPAN_WARNING {
        tracing::warn!(
            goal_id = %goal.id,
            months = span,
            "decomposing goal spanning more than a year into months"
        );
    }

    if span == 0 {
        return Vec::new();
    }

    let mut children = Vec::new();
    let mut cursor = month_start(goal.start_date.year(), goal.start_date.month());
    let final_month = month_start(goal.target_date.year(), goal.target_date.month());

    while let (Some(start), Some(last)) = (cursor, final_month) {
        if start > last {
            break;
        }
        let Some(end) = month_end(start.year(), start.month()) else {
            break;
        };
        let label = start.format("%B %Y").to_string();
        children.push(child_goal(
            goal,
            Timeframe::Monthly,
            format!("{label}: {}", goal.title),
            format!(
                "Monthly step toward \"{}\". Customize the focus for {label}.",
                goal.title
            ),
            start,
            end,
            now,
        ));
        cursor = end.succ_opt();
    }

    tracing::info!(
        goal_id = %goal.id,
        count = children.len(),
        "decomposed goal into months"
    );
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::tests::goal;
    use crate::loops::LoopId;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn annual_yields_four_contiguous_quarters() {
        let parent = goal("annual-1", LoopId::Health, Timeframe::Annual);
        let now = Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap();
        let quarters = decompose_annual_to_quarterly(&parent, now);

        assert_eq!(quarters.len(), 4);
        assert_eq!(quarters[0].start_date, date(2026, 1, 1));
        assert_eq!(quarters[0].target_date, date(2026, 3, 31));
        assert_eq!(quarters[3].start_date, date(2026, 10, 1));
        assert_eq!(quarters[3].target_date, date(2026, 12, 31));
        for pair in quarters.windows(2) {
            assert_eq!(pair[0].target_date.succ_opt().unwrap(), pair[1].start_date);
        }
        for q in &quarters {
            assert_eq!(q.parent_goal_id.as_deref(), Some("annual-1"));
            assert_eq!(q.timeframe, Timeframe::Quarterly);
            assert_eq!(q.status, GoalStatus::Active);
            assert_eq!(q.progress, 0);
            assert_eq!(q.loop_id, LoopId::Health);
            assert!(q.metrics.is_empty());
            assert_eq!(q.created_at, now);
        }
        assert!(quarters[1].title.starts_with("Q2 2026"));
    }

    #[test]
    fn quarters_follow_now_not_parent_start() {
        let mut parent = goal("annual-2", LoopId::Work, Timeframe::Annual);
        parent.start_date = date(2024, 6, 1);
        parent.target_date = date(2025, 5, 31);
        let now = Utc.with_ymd_and_hms(2027, 2, 1, 0, 0, 0).unwrap();

        let quarters = decompose_annual_to_quarterly(&parent, now);
        assert!(quarters.iter().all(|q| q.start_date.year() == 2027));
    }

    #[test]
    fn child_ids_are_unique() {
        let parent = goal("annual-3", LoopId::Fun, Timeframe::Annual);
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let quarters = decompose_annual_to_quarterly(&parent, now);
        let mut ids: Vec<&str> = quarters.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn quarterly_spans_three_months() {
        let mut parent = goal("q-1", LoopId::Wealth, Timeframe::Quarterly);
        parent.start_date = date(2026, 4, 1);
        parent.target_date = date(2026, 6, 30);
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();

        let months = decompose_quarterly_to_monthly(&parent, now);
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].start_date, date(2026, 4, 1));
        assert_eq!(months[0].target_date, date(2026, 4, 30));
        assert_eq!(months[2].target_date, date(2026, 6, 30));
        assert!(months[1].title.starts_with("May 2026"));
        assert!(months
            .iter()
            .all(|m| m.parent_goal_id.as_deref() == Some("q-1") && m.timeframe == Timeframe::Monthly));
    }

    #[test]
    fn partial_months_count_at_both_ends() {
        let mut parent = goal("q-2", LoopId::Family, Timeframe::Quarterly);
        parent.start_date = date(2026, 11, 15);
        parent.target_date = date(2027, 1, 3);
        let now = Utc.with_ymd_and_hms(2026, 11, 15, 0, 0, 0).unwrap();

        let months = decompose_quarterly_to_monthly(&parent, now);
        assert_eq!(months.len(), 3);
        assert_eq!(months[1].start_date, date(2026, 12, 1));
        assert_eq!(months[2].start_date, date(2027, 1, 1));
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let mut parent = goal("q-3", LoopId::Family, Timeframe::Quarterly);
        parent.start_date = date(2026, 6, 1);
        parent.target_date = date(2026, 3, 1);
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        assert!(decompose_quarterly_to_monthly(&parent, now).is_empty());

        parent.start_date = date(2026, 6, 15);
        parent.target_date = date(2026, 6, 1);
        assert!(decompose_quarterly_to_monthly(&parent, now).is_empty());
    }

    #[test]
    fn month_span_counts_calendar_months() {
        assert_eq!(month_span(date(2026, 4, 1), date(2026, 6, 30)), 3);
        assert_eq!(month_span(date(2026, 11, 15), date(2027, 1, 3)), 3);
        assert_eq!(month_span(date(2026, 6, 1), date(2026, 3, 1)), 0);
        assert_eq!(month_span(date(2026, 6, 15), date(2026, 6, 1)), 0);
        assert_eq!(month_span(date(1, 1, 1), date(9999, 12, 31)), 119_988);
        assert!(month_span(date(2026, 1, 1), date(2026, 12, 31)) <= MONTHLY_SPAN_WARNING);
    }

    #[test]
    fn long_span_is_walked_in_full() {
        let mut parent = goal("q-4", LoopId::Work, Timeframe::Quarterly);
        parent.start_date = date(2026, 1, 1);
        parent.target_date = date(2027, 12, 31);
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let months = decompose_quarterly_to_monthly(&parent, now);
        assert_eq!(months.len() as i64, month_span(parent.start_date, parent.target_date));
        assert_eq!(months.len(), 24);
    }

    #[test]
    fn mismatched_timeframe_is_still_decomposed() {
        // Annual goal passed to the monthly decomposer is accepted as-is.
        let parent = goal("annual-4", LoopId::Meaning, Timeframe::Annual);
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(decompose_quarterly_to_monthly(&parent, now).len(), 12);
    }
}
