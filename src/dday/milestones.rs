//! Projects fixed anniversary offsets from each item's target date and
//! reports the ones landing within the next year.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date_math::{format_iso, parse_iso};
use super::item::DdayItem;

/// Fixed offsets, paired with the display names the app shows.
pub const MILESTONE_OFFSETS: [(i64, &str); 8] = [
    (100, "100일"),
    (200, "200일"),
    (300, "300일"),
    (365, "1주년"),
    (500, "500일"),
    (730, "2주년"),
    (1000, "1000일"),
    (1095, "3주년"),
];

/// Horizon for the suggestion feed; anything further out is noise.
const HORIZON_DAYS: i64 = 365;

/// One suggested upcoming anniversary. Accepting it creates an ordinary new
/// item through the store; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneItem {
    pub source_id: Uuid,
    pub source_title: String,
    pub milestone_name: String,
    pub milestone_date: String,
    pub days_until: i64,
}

/// All milestones that are strictly in the future and at most a year out,
/// nearest first. Items with unparseable target dates contribute nothing.
pub fn upcoming_milestones(items: &[DdayItem], today: NaiveDate) -> Vec<MilestoneItem> {
    let mut milestones: Vec<MilestoneItem> = Vec::new();

    for item in items {
        let Some(target) = parse_iso(&item.target_date) else {
            continue;
        };
        for (offset, name) in MILESTONE_OFFSETS {
            let milestone_date = target + Duration::days(offset);
            let days_until = (milestone_date - today).num_days();
            if days_until > 0 && days_until <= HORIZON_DAYS {
                milestones.push(MilestoneItem {
                    source_id: item.id,
                    source_title: item.title.clone(),
                    milestone_name: name.to_string(),
                    milestone_date: format_iso(milestone_date),
                    days_until,
                });
            }
        }
    }

    milestones.sort_by_key(|m| m.days_until);
    milestones
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_strict_at_both_ends() {
        let today = date(2026, 8, 30);
        // 100-day milestone lands exactly today: excluded.
        let on_boundary = DdayItem::new("zero", "2026-05-22");
        assert!(upcoming_milestones(&[on_boundary], today).is_empty());

        // One day out: included.
        let tomorrow = DdayItem::new("one", "2026-05-23");
        let found = upcoming_milestones(&[tomorrow], today);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until, 1);
        assert_eq!(found[0].milestone_name, "100일");
    }

    #[test]
    fn horizon_includes_365_excludes_366() {
        // Target today: the 365-day milestone is exactly 365 days out.
        let today = date(2026, 8, 30);
        let item = DdayItem::new("anchor", "2026-08-30");
        let found = upcoming_milestones(&[item], today);
        let names: Vec<&str> = found.iter().map(|m| m.milestone_name.as_str()).collect();
        assert_eq!(names, vec!["100일", "200일", "300일", "1주년"]);
        assert_eq!(found.last().unwrap().days_until, 365);

        // Shift the target one day later and the anniversary falls off.
        let item = DdayItem::new("anchor", "2026-08-31");
        let found = upcoming_milestones(&[item], today);
        let names: Vec<&str> = found.iter().map(|m| m.milestone_name.as_str()).collect();
        assert_eq!(names, vec!["100일", "200일", "300일"]);
    }

    #[test]
    fn sorted_ascending_across_items() {
        let today = date(2026, 8, 30);
        let a = DdayItem::new("a", "2026-06-01"); // 100일 in 8 days
        let b = DdayItem::new("b", "2026-08-28"); // 100일 in 98 days
        let found = upcoming_milestones(&[b, a], today);
        let untils: Vec<i64> = found.iter().map(|m| m.days_until).collect();
        let mut sorted = untils.clone();
        sorted.sort();
        assert_eq!(untils, sorted);
    }

    #[test]
    fn malformed_target_contributes_nothing() {
        let item = DdayItem::new("broken", "n/a");
        assert!(upcoming_milestones(&[item], date(2026, 8, 30)).is_empty());
    }

    #[test]
    fn milestone_date_is_iso() {
        let today = date(2026, 8, 30);
        let item = DdayItem::new("d", "2026-06-01");
        let found = upcoming_milestones(&[item], today);
        assert_eq!(found[0].milestone_date, "2026-09-09");
    }
}
