use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single tracked date. The sole persisted entity; everything else the
/// engine produces is derived fresh from a slice of these.
///
/// `target_date` stays a raw `YYYY-MM-DD` string because the storage slot was
/// written by front ends that never validated it; a malformed date must load
/// fine and count as D-Day 0 rather than poison deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DdayItem {
    pub id: Uuid,
    pub title: String,
    pub target_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_amount: Option<u64>,
    #[serde(default)]
    pub saved_amount: u64,
    pub created_at: DateTime<Utc>,
}

impl DdayItem {
    pub fn new(title: impl Into<String>, target_date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            target_date: target_date.into(),
            category: None,
            goal_amount: None,
            saved_amount: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Goals of zero are treated as no goal at all.
    pub fn with_goal(mut self, goal_amount: u64) -> Self {
        self.goal_amount = (goal_amount > 0).then_some(goal_amount);
        self
    }

    /// Category used for aggregation; absent tags fall into the catch-all.
    pub fn effective_category(&self) -> Category {
        self.category.unwrap_or(Category::Etc)
    }
}

/// Closed category set shared by both front ends. Tags written by older app
/// versions that are not in this set deserialize as `Etc`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anniversary,
    Birthday,
    Exam,
    Travel,
    Work,
    #[serde(other)]
    Etc,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Anniversary,
        Category::Birthday,
        Category::Exam,
        Category::Travel,
        Category::Work,
        Category::Etc,
    ];

    /// Korean display name, as rendered by the app.
    pub fn label(self) -> &'static str {
        match self {
            Category::Anniversary => "기념일",
            Category::Birthday => "생일",
            Category::Exam => "시험",
            Category::Travel => "여행",
            Category::Work => "업무",
            Category::Etc => "기타",
        }
    }

    /// Remixicon id used by both front ends.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Anniversary => "ri-heart-line",
            Category::Birthday => "ri-cake-2-line",
            Category::Exam => "ri-file-text-line",
            Category::Travel => "ri-plane-line",
            Category::Work => "ri-briefcase-line",
            Category::Etc => "ri-calendar-line",
        }
    }

    /// Stable id used as the storage tag and for parsing user input.
    pub fn id(self) -> &'static str {
        match self {
            Category::Anniversary => "anniversary",
            Category::Birthday => "birthday",
            Category::Exam => "exam",
            Category::Travel => "travel",
            Category::Work => "work",
            Category::Etc => "etc",
        }
    }

    pub fn parse(tag: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.id() == tag)
    }
}
