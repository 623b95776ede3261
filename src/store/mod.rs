//! Owned item collection plus its JSON file persistence. This is the one
//! stateful collaborator; the engine only ever sees `&[DdayItem]` snapshots
//! borrowed from here.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use uuid::Uuid;

use crate::dday::item::{Category, DdayItem};
use crate::errors::StoreError;

const DEFAULT_DIR_NAME: &str = ".dday_mate";
const STORE_FILE: &str = "ddays.json";

/// Returns the application data directory, defaulting to `~/.dday_mate`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("DDAY_MATE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical path of the single storage slot.
pub fn store_file() -> PathBuf {
    app_data_dir().join(STORE_FILE)
}

/// Fields a caller supplies when creating an item; everything else
/// (id, timestamps, zeroed savings) is assigned here.
#[derive(Debug, Clone, Default)]
pub struct NewDday {
    pub title: String,
    pub target_date: String,
    pub category: Option<Category>,
    pub goal_amount: Option<u64>,
}

/// Partial update. `id` and `created_at` are not patchable; a goal of 0
/// clears the goal entirely.
#[derive(Debug, Clone, Default)]
pub struct DdayPatch {
    pub title: Option<String>,
    pub target_date: Option<String>,
    pub category: Option<Category>,
    pub goal_amount: Option<u64>,
    pub saved_amount: Option<u64>,
}

/// The persisted collection, insertion-ordered. Every mutation writes the
/// whole list back atomically (stage to `.tmp`, then rename).
pub struct DdayStore {
    items: Vec<DdayItem>,
    path: PathBuf,
}

impl DdayStore {
    /// Opens the store at `path`, loading the existing list if the file is
    /// present. A missing file starts an empty collection; an unreadable one
    /// is a real error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        tracing::debug!(items = items.len(), path = %path.display(), "store opened");
        Ok(Self { items, path })
    }

    /// Opens the store at the default slot under the app data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = store_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Snapshot the engine functions consume.
    pub fn items(&self) -> &[DdayItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&DdayItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Creates a new item: trims the title, drops non-positive goals, zeroes
    /// the saved amount, assigns id and creation timestamp, then persists.
    pub fn add(&mut self, draft: NewDday) -> Result<&DdayItem, StoreError> {
        let item = DdayItem {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            target_date: draft.target_date,
            category: draft.category,
            goal_amount: draft.goal_amount.filter(|g| *g > 0),
            saved_amount: 0,
            created_at: Utc::now(),
        };
        tracing::debug!(id = %item.id, title = %item.title, "adding item");
        self.items.push(item);
        self.save()?;
        Ok(self.items.last().expect("just pushed"))
    }

    /// Applies a partial update and persists. Unknown ids are an error.
    pub fn update(&mut self, id: Uuid, patch: DdayPatch) -> Result<(), StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))?;

        if let Some(title) = patch.title {
            item.title = title.trim().to_string();
        }
        if let Some(target_date) = patch.target_date {
            item.target_date = target_date;
        }
        if let Some(category) = patch.category {
            item.category = Some(category);
        }
        if let Some(goal) = patch.goal_amount {
            item.goal_amount = (goal > 0).then_some(goal);
        }
        if let Some(saved) = patch.saved_amount {
            item.saved_amount = saved;
        }
        tracing::debug!(id = %id, "updated item");
        self.save()
    }

    /// Removes an item by id and persists.
    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Err(StoreError::UnknownItem(id.to_string()));
        }
        tracing::debug!(id = %id, "deleted item");
        self.save()
    }

    /// Writes the current list to disk atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        save_items(&self.items, &self.path)
    }
}

fn save_items(items: &[DdayItem], path: &Path) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(items)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, DdayStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DdayStore::open(dir.path().join("ddays.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let (_dir, store) = temp_store();
        assert!(store.items().is_empty());
    }

    #[test]
    fn add_normalizes_draft_fields() {
        let (_dir, mut store) = temp_store();
        let id = store
            .add(NewDday {
                title: "  수능  ".into(),
                target_date: "2026-11-19".into(),
                category: Some(Category::Exam),
                goal_amount: Some(0),
            })
            .unwrap()
            .id;
        let item = store.get(id).unwrap();
        assert_eq!(item.title, "수능");
        assert_eq!(item.goal_amount, None);
        assert_eq!(item.saved_amount, 0);
    }

    #[test]
    fn update_patches_everything_but_identity() {
        let (_dir, mut store) = temp_store();
        let id = store
            .add(NewDday {
                title: "여행".into(),
                target_date: "2026-10-01".into(),
                ..NewDday::default()
            })
            .unwrap()
            .id;
        let created_at = store.get(id).unwrap().created_at;

        store
            .update(
                id,
                DdayPatch {
                    title: Some("제주 여행".into()),
                    goal_amount: Some(300_000),
                    saved_amount: Some(50_000),
                    ..DdayPatch::default()
                },
            )
            .unwrap();

        let item = store.get(id).unwrap();
        assert_eq!(item.title, "제주 여행");
        assert_eq!(item.goal_amount, Some(300_000));
        assert_eq!(item.saved_amount, 50_000);
        assert_eq!(item.created_at, created_at);
    }

    #[test]
    fn zero_goal_patch_clears_goal() {
        let (_dir, mut store) = temp_store();
        let id = store
            .add(NewDday {
                title: "저축".into(),
                target_date: "2026-12-25".into(),
                goal_amount: Some(1000),
                ..NewDday::default()
            })
            .unwrap()
            .id;
        store
            .update(
                id,
                DdayPatch {
                    goal_amount: Some(0),
                    ..DdayPatch::default()
                },
            )
            .unwrap();
        assert_eq!(store.get(id).unwrap().goal_amount, None);
    }

    #[test]
    fn unknown_id_errors() {
        let (_dir, mut store) = temp_store();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.delete(missing),
            Err(StoreError::UnknownItem(_))
        ));
        assert!(matches!(
            store.update(missing, DdayPatch::default()),
            Err(StoreError::UnknownItem(_))
        ));
    }

    #[test]
    fn reload_round_trips_in_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ddays.json");
        {
            let mut store = DdayStore::open(&path).unwrap();
            for title in ["첫째", "둘째", "셋째"] {
                store
                    .add(NewDday {
                        title: title.into(),
                        target_date: "2026-09-09".into(),
                        ..NewDday::default()
                    })
                    .unwrap();
            }
        }
        let store = DdayStore::open(&path).unwrap();
        let titles: Vec<&str> = store.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["첫째", "둘째", "셋째"]);
    }

    #[test]
    fn malformed_date_still_loads_and_counts_as_today() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ddays.json");
        fs::write(
            &path,
            r#"[{
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "title": "legacy",
                "targetDate": "someday",
                "createdAt": "2025-01-01T00:00:00Z"
            }]"#,
        )
        .unwrap();
        let store = DdayStore::open(&path).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let stats = crate::dday::aggregate(store.items(), today);
        assert_eq!(stats.today_ddays, 1);
    }
}
