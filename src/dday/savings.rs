//! Goal-pacing math for items that carry a monetary goal. Uniform
//! amortization with ceiling division, so following the suggestion always
//! reaches the goal by the target date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::compute_dday;
use super::item::DdayItem;

/// Derived pacing snapshot for one goal-bearing item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsInfo {
    pub goal_amount: u64,
    pub saved_amount: u64,
    pub remaining_amount: u64,
    pub days_left: u64,
    pub daily_suggestion: u64,
    pub weekly_suggestion: u64,
    pub monthly_suggestion: u64,
    pub progress_percent: u64,
}

/// `None` unless the item has a positive goal. Past or same-day targets get
/// `days_left == 0` and a zero daily suggestion, never negative pacing.
pub fn savings_plan(item: &DdayItem, today: NaiveDate) -> Option<SavingsInfo> {
    let goal = item.goal_amount.filter(|g| *g > 0)?;

    let dday = compute_dday(item, today);
    let days_left = if dday < 0 { dday.unsigned_abs() } else { 0 };
    let saved = item.saved_amount;
    let remaining = goal.saturating_sub(saved);
    // Over-saving clamps to 100, not an error.
    let progress_percent = ((saved as f64 / goal as f64) * 100.0).round().min(100.0) as u64;

    Some(SavingsInfo {
        goal_amount: goal,
        saved_amount: saved,
        remaining_amount: remaining,
        days_left,
        daily_suggestion: if days_left > 0 {
            remaining.div_ceil(days_left)
        } else {
            0
        },
        weekly_suggestion: if days_left > 7 {
            remaining.div_ceil(days_left.div_ceil(7))
        } else {
            remaining
        },
        monthly_suggestion: if days_left > 30 {
            remaining.div_ceil(days_left.div_ceil(30))
        } else {
            remaining
        },
        progress_percent,
    })
}
