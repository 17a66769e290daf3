//! Process-local remote store.
//!
//! Assigns ids itself, so it doubles as the backing store for offline-only
//! use and as the test double for the repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{RemoteError, RemoteStore};
use crate::habit::{Habit, HabitUpdate, NewHabitRecord};

#[derive(Debug, Clone)]
struct StoredHabit {
    owner: String,
    habit: Habit,
}

#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    rows: Mutex<Vec<StoredHabit>>,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `habits` owned by `user_id`.
    pub fn with_habits(user_id: &str, habits: impl IntoIterator<Item = Habit>) -> Self {
        let rows = habits
            .into_iter()
            .map(|habit| StoredHabit {
                owner: user_id.to_string(),
                habit,
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Number of stored habits across all users.
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> MutexGuard<'_, Vec<StoredHabit>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Habit>, RemoteError> {
        Ok(self
            .rows()
            .iter()
            .filter(|row| row.owner == user_id)
            .map(|row| row.habit.clone())
            .collect())
    }

    async fn create(&self, record: &NewHabitRecord) -> Result<(), RemoteError> {
        let draft = &record.draft;
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            frequency: draft.frequency,
            icon: draft.icon.clone(),
            color: draft.color.clone(),
            created: Utc::now(),
            completed_dates: BTreeSet::new(),
            streak: 0,
            longest_streak: 0,
            last_updated: None,
        };
        self.rows().push(StoredHabit {
            owner: record.user_id.clone(),
            habit,
        });
        Ok(())
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<(), RemoteError> {
        let mut rows = self.rows();
        let row = rows
            .iter_mut()
            .find(|row| row.habit.id == id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        update.apply_to(&mut row.habit);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.habit.id != id);
        if rows.len() == before {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
