//! Collection-wide rollups: counts, category breakdown, narrative insights,
//! the monthly heatmap window, and the savings summary.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::engine::compute_dday;
use super::item::{Category, DdayItem};
use super::savings::savings_plan;

/// Aggregate snapshot of the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DdayStats {
    pub total_ddays: usize,
    pub upcoming_ddays: usize,
    pub past_ddays: usize,
    pub today_ddays: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    pub nearest: Option<DdayItem>,
    pub longest_running: Option<DdayItem>,
}

/// Single pass over the collection. Ties for nearest/longest go to the item
/// encountered first, i.e. stored order.
pub fn aggregate(items: &[DdayItem], today: NaiveDate) -> DdayStats {
    let mut stats = DdayStats {
        total_ddays: items.len(),
        upcoming_ddays: 0,
        past_ddays: 0,
        today_ddays: 0,
        category_breakdown: BTreeMap::new(),
        nearest: None,
        longest_running: None,
    };

    let mut nearest_dist = i64::MAX;
    let mut longest_days = 0i64;

    for item in items {
        let dday = compute_dday(item, today);
        if dday == 0 {
            stats.today_ddays += 1;
        } else if dday < 0 {
            stats.upcoming_ddays += 1;
            let dist = dday.abs();
            if dist < nearest_dist {
                nearest_dist = dist;
                stats.nearest = Some(item.clone());
            }
        } else {
            stats.past_ddays += 1;
            if dday > longest_days {
                longest_days = dday;
                stats.longest_running = Some(item.clone());
            }
        }

        *stats
            .category_breakdown
            .entry(item.effective_category())
            .or_insert(0) += 1;
    }

    stats
}

/// One narrative fact for the analytics screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsInsight {
    pub icon: String,
    pub label: String,
    pub value: String,
}

impl AnalyticsInsight {
    fn new(icon: &str, label: &str, value: String) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// Up to six insights in fixed priority order; the first is the one the UI
/// shows for free, the rest sit behind the unlock. Facts whose preconditions
/// fail are skipped, not emitted empty.
pub fn generate_insights(
    items: &[DdayItem],
    stats: &DdayStats,
    today: NaiveDate,
) -> Vec<AnalyticsInsight> {
    let mut insights = Vec::new();

    // 1. Most populated category.
    if let Some((category, count)) = stats
        .category_breakdown
        .iter()
        .max_by_key(|(_, count)| **count)
    {
        insights.push(AnalyticsInsight::new(
            category.icon(),
            "가장 많은 카테고리",
            format!("{} {}개", category.label(), count),
        ));
    }

    // 2. Average distance to upcoming D-Days.
    let upcoming: Vec<i64> = items
        .iter()
        .map(|item| compute_dday(item, today))
        .filter(|dday| *dday < 0)
        .map(|dday| dday.abs())
        .collect();
    if !upcoming.is_empty() {
        let avg = (upcoming.iter().sum::<i64>() as f64 / upcoming.len() as f64).round() as i64;
        insights.push(AnalyticsInsight::new(
            "ri-calendar-check-line",
            "다가오는 D-Day 평균",
            format!("{avg}일 남음"),
        ));
    }

    // 3. Longest running count-up.
    if let Some(item) = &stats.longest_running {
        insights.push(AnalyticsInsight::new(
            "ri-history-line",
            "가장 오래된 D-Day",
            format!("{} D+{}", item.title, compute_dday(item, today)),
        ));
    }

    // 4. Items landing this calendar month.
    let month_prefix = format!("{:04}-{:02}", today.year(), today.month());
    let due_this_month = items
        .iter()
        .filter(|item| item.target_date.starts_with(&month_prefix))
        .count();
    if due_this_month > 0 {
        insights.push(AnalyticsInsight::new(
            "ri-calendar-event-line",
            "이번 달 D-Day",
            format!("{due_this_month}개"),
        ));
    }

    // 5. Average savings progress across goal-bearing items.
    let progresses: Vec<u64> = items
        .iter()
        .filter_map(|item| savings_plan(item, today))
        .map(|plan| plan.progress_percent)
        .collect();
    if !progresses.is_empty() {
        let avg =
            (progresses.iter().sum::<u64>() as f64 / progresses.len() as f64).round() as u64;
        insights.push(AnalyticsInsight::new(
            "ri-money-cny-circle-line",
            "평균 저축 진행률",
            format!("{avg}%"),
        ));
    }

    // 6. Total absolute tracked days.
    let total_days: i64 = items
        .iter()
        .map(|item| compute_dday(item, today).abs())
        .sum();
    if total_days > 0 {
        insights.push(AnalyticsInsight::new(
            "ri-time-line",
            "함께한 총 일수",
            format!("{total_days}일"),
        ));
    }

    insights
}

/// One row of the monthly heatmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// `YYYY-MM`.
    pub month: String,
    pub count: usize,
    pub is_current: bool,
}

/// Fixed 12-month window: five months before the current month through six
/// after. Counts match on the `YYYY-MM` prefix of the stored date string.
pub fn monthly_distribution(items: &[DdayItem], today: NaiveDate) -> Vec<MonthlyBucket> {
    let current_index = today.year() * 12 + today.month() as i32 - 1;
    (-5..=6)
        .map(|delta| {
            let index = current_index + delta;
            let (year, month) = (index.div_euclid(12), index.rem_euclid(12) + 1);
            let prefix = format!("{year:04}-{month:02}");
            let count = items
                .iter()
                .filter(|item| item.target_date.starts_with(&prefix))
                .count();
            MonthlyBucket {
                month: prefix,
                count,
                is_current: delta == 0,
            }
        })
        .collect()
}

/// Rollup across every goal-bearing item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAggregation {
    pub goal_count: usize,
    pub total_goal: u64,
    pub total_saved: u64,
    pub total_remaining: u64,
    pub average_progress: u64,
}

/// `None` when no item carries a goal.
pub fn aggregate_savings(items: &[DdayItem]) -> Option<SavingsAggregation> {
    let mut agg = SavingsAggregation {
        goal_count: 0,
        total_goal: 0,
        total_saved: 0,
        total_remaining: 0,
        average_progress: 0,
    };
    let mut progress_sum = 0u64;

    for item in items {
        let Some(goal) = item.goal_amount.filter(|g| *g > 0) else {
            continue;
        };
        agg.goal_count += 1;
        agg.total_goal += goal;
        agg.total_saved += item.saved_amount;
        agg.total_remaining += goal.saturating_sub(item.saved_amount);
        progress_sum += ((item.saved_amount as f64 / goal as f64) * 100.0)
            .round()
            .min(100.0) as u64;
    }

    if agg.goal_count == 0 {
        return None;
    }
    agg.average_progress =
        (progress_sum as f64 / agg.goal_count as f64).round() as u64;
    Some(agg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(title: &str, target: &str) -> DdayItem {
        DdayItem::new(title, target)
    }

    #[test]
    fn counts_partition_the_collection() {
        let today = date(2026, 8, 30);
        let items = vec![
            item("today", "2026-08-30"),
            item("soon", "2026-09-04"),
            item("past", "2026-07-01"),
            item("broken", "???"),
        ];
        let stats = aggregate(&items, today);
        assert_eq!(stats.total_ddays, 4);
        // Malformed dates count as today by the degrade-to-zero rule.
        assert_eq!(stats.today_ddays, 2);
        assert_eq!(stats.upcoming_ddays, 1);
        assert_eq!(stats.past_ddays, 1);
        assert_eq!(
            stats.upcoming_ddays + stats.past_ddays + stats.today_ddays,
            stats.total_ddays
        );
    }

    #[test]
    fn worked_example_today_plus_five() {
        let today = date(2026, 8, 30);
        let items = vec![item("a", "2026-08-30"), item("b", "2026-09-04")];
        let stats = aggregate(&items, today);
        assert_eq!(stats.today_ddays, 1);
        assert_eq!(stats.upcoming_ddays, 1);
        assert_eq!(stats.past_ddays, 0);
    }

    #[test]
    fn nearest_and_longest_break_ties_by_order() {
        let today = date(2026, 8, 30);
        let items = vec![
            item("first-near", "2026-09-09"),
            item("second-near", "2026-09-09"),
            item("first-old", "2026-01-01"),
            item("second-old", "2026-01-01"),
        ];
        let stats = aggregate(&items, today);
        assert_eq!(stats.nearest.unwrap().title, "first-near");
        assert_eq!(stats.longest_running.unwrap().title, "first-old");
    }

    #[test]
    fn category_breakdown_defaults_to_etc() {
        let today = date(2026, 8, 30);
        let items = vec![
            item("a", "2026-09-01").with_category(Category::Travel),
            item("b", "2026-09-02").with_category(Category::Travel),
            item("c", "2026-09-03"),
        ];
        let stats = aggregate(&items, today);
        assert_eq!(stats.category_breakdown[&Category::Travel], 2);
        assert_eq!(stats.category_breakdown[&Category::Etc], 1);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let today = date(2026, 8, 30);
        let items = vec![item("a", "2026-09-01"), item("b", "2026-05-01")];
        assert_eq!(aggregate(&items, today), aggregate(&items, today));
    }

    #[test]
    fn insights_respect_preconditions_and_order() {
        let today = date(2026, 8, 30);
        let items = vec![item("past", "2026-06-01")];
        let stats = aggregate(&items, today);
        let insights = generate_insights(&items, &stats, today);
        let labels: Vec<&str> = insights.iter().map(|i| i.label.as_str()).collect();
        // No upcoming, nothing this month, no goals: three facts only.
        assert_eq!(
            labels,
            vec!["가장 많은 카테고리", "가장 오래된 D-Day", "함께한 총 일수"]
        );
        assert_eq!(insights[1].value, "past D+90");
    }

    #[test]
    fn insights_empty_for_empty_collection() {
        let today = date(2026, 8, 30);
        let stats = aggregate(&[], today);
        assert!(generate_insights(&[], &stats, today).is_empty());
    }

    #[test]
    fn savings_insight_appears_with_goals() {
        let today = date(2026, 8, 30);
        let mut a = item("a", "2026-09-09").with_goal(1000);
        a.saved_amount = 500;
        let items = vec![a];
        let stats = aggregate(&items, today);
        let insights = generate_insights(&items, &stats, today);
        assert!(insights
            .iter()
            .any(|i| i.label == "평균 저축 진행률" && i.value == "50%"));
    }

    #[test]
    fn monthly_window_spans_twelve_months() {
        let today = date(2026, 2, 15);
        let items = vec![
            item("sep", "2025-09-09"),
            item("feb1", "2026-02-01"),
            item("feb2", "2026-02-27"),
            item("aug", "2026-08-01"),
        ];
        let buckets = monthly_distribution(&items, today);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.first().unwrap().month, "2025-09");
        assert_eq!(buckets.last().unwrap().month, "2026-08");
        assert_eq!(buckets.first().unwrap().count, 1);
        assert_eq!(buckets.last().unwrap().count, 1);
        let current: Vec<&MonthlyBucket> =
            buckets.iter().filter(|b| b.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].month, "2026-02");
        assert_eq!(current[0].count, 2);
    }

    #[test]
    fn savings_aggregation_rolls_up_goals() {
        let mut a = item("a", "2026-09-09").with_goal(1000);
        a.saved_amount = 200;
        let mut b = item("b", "2026-12-25").with_goal(500);
        b.saved_amount = 500;
        let items = vec![a, b, item("no-goal", "2026-10-01")];

        let agg = aggregate_savings(&items).unwrap();
        assert_eq!(agg.goal_count, 2);
        assert_eq!(agg.total_goal, 1500);
        assert_eq!(agg.total_saved, 700);
        assert_eq!(agg.total_remaining, 800);
        assert_eq!(agg.average_progress, 60); // (20 + 100) / 2

        assert!(aggregate_savings(&[item("x", "2026-01-01")]).is_none());
    }
}
