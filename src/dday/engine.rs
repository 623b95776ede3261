//! Per-item D-Day values, display labels, and the list projections the front
//! ends render.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use super::date_math::{self, day_offset};
use super::item::DdayItem;

/// Signed D-Day value of an item relative to `today`.
pub fn compute_dday(item: &DdayItem, today: NaiveDate) -> i64 {
    day_offset(today, &item.target_date)
}

/// Canonical label: `D-Day`, `D+N`, or `D-N`.
///
/// Negative values render the number's own minus sign (`D{n}`), which is the
/// exact string the share/export path copies to the clipboard.
pub fn dday_label(days: i64) -> String {
    match days {
        0 => "D-Day".to_string(),
        n if n > 0 => format!("D+{n}"),
        n => format!("D{n}"),
    }
}

/// The clipboard block the app shares for a single item.
pub fn share_text(item: &DdayItem, today: NaiveDate) -> String {
    let dday = compute_dday(item, today);
    format!(
        "{}\n{}\n{}\n\n하루모아",
        item.title,
        dday_label(dday),
        date_math::format_korean_date(&item.target_date)
    )
}

/// Items sorted by proximity to today (smallest |D-Day| first). Stable, so
/// equally distant items keep their stored order.
pub fn sorted_by_proximity(items: &[DdayItem], today: NaiveDate) -> Vec<DdayItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| compute_dday(item, today).abs());
    sorted
}

/// Upcoming items (target still ahead), nearest first.
pub fn upcoming_items(items: &[DdayItem], today: NaiveDate) -> Vec<DdayItem> {
    let mut upcoming: Vec<DdayItem> = items
        .iter()
        .filter(|item| compute_dday(item, today) < 0)
        .cloned()
        .collect();
    upcoming.sort_by_key(|item| compute_dday(item, today).abs());
    upcoming
}

/// Past items (target already passed), most recent first.
pub fn past_items(items: &[DdayItem], today: NaiveDate) -> Vec<DdayItem> {
    let mut past: Vec<DdayItem> = items
        .iter()
        .filter(|item| compute_dday(item, today) > 0)
        .cloned()
        .collect();
    past.sort_by_key(|item| compute_dday(item, today));
    past
}

/// Day-of-month numbers that carry at least one D-Day in the given month.
/// Backs the calendar view's dot markers.
pub fn days_with_dday(items: &[DdayItem], year: i32, month: u32) -> BTreeSet<u32> {
    let prefix = format!("{year:04}-{month:02}");
    items
        .iter()
        .filter(|item| item.target_date.starts_with(&prefix))
        .filter_map(|item| date_math::parse_iso(&item.target_date))
        .map(|date| date.day())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_sign_convention_is_exact() {
        assert_eq!(dday_label(0), "D-Day");
        assert_eq!(dday_label(7), "D+7");
        assert_eq!(dday_label(-7), "D-7");
    }

    #[test]
    fn share_text_shape() {
        let item = DdayItem::new("제주 여행", "2026-09-09");
        let text = share_text(&item, date(2026, 8, 30));
        assert_eq!(text, "제주 여행\nD-10\n2026년 9월 9일\n\n하루모아");
    }

    #[test]
    fn proximity_sort_mixes_past_and_future() {
        let today = date(2026, 8, 30);
        let items = vec![
            DdayItem::new("far", "2027-08-30"),
            DdayItem::new("yesterday", "2026-08-29"),
            DdayItem::new("soon", "2026-09-02"),
        ];
        let sorted = sorted_by_proximity(&items, today);
        let titles: Vec<&str> = sorted.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["yesterday", "soon", "far"]);
    }

    #[test]
    fn upcoming_and_past_partition() {
        let today = date(2026, 8, 30);
        let items = vec![
            DdayItem::new("past", "2026-08-01"),
            DdayItem::new("today", "2026-08-30"),
            DdayItem::new("future", "2026-09-15"),
        ];
        let up = upcoming_items(&items, today);
        let past = past_items(&items, today);
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].title, "future");
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].title, "past");
    }

    #[test]
    fn calendar_days_for_month() {
        let items = vec![
            DdayItem::new("a", "2026-09-09"),
            DdayItem::new("b", "2026-09-21"),
            DdayItem::new("c", "2026-10-09"),
            DdayItem::new("broken", "2026-09-99"),
        ];
        let days = days_with_dday(&items, 2026, 9);
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![9, 21]);
    }
}
