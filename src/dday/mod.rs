//! The pure D-Day engine: date math, per-item countdown values, milestone
//! projection, savings pacing, and collection analytics. Every function takes
//! its reference date explicitly and never mutates its input.

pub mod date_math;
pub mod engine;
pub mod item;
pub mod milestones;
pub mod savings;
pub mod stats;

pub use date_math::{day_offset, days_between, format_iso, format_korean_date, weekday_korean};
pub use engine::{
    compute_dday, days_with_dday, dday_label, past_items, share_text, sorted_by_proximity,
    upcoming_items,
};
pub use item::{Category, DdayItem};
pub use milestones::{upcoming_milestones, MilestoneItem, MILESTONE_OFFSETS};
pub use savings::{savings_plan, SavingsInfo};
pub use stats::{
    aggregate, aggregate_savings, generate_insights, monthly_distribution, AnalyticsInsight,
    DdayStats, MonthlyBucket, SavingsAggregation,
};
