//! The habit repository: canonical client-side state for one session.
//!
//! Completion toggles and notification management are synchronous and
//! local. Create/edit/delete go through the [`RemoteStore`] and then refresh
//! the whole collection from it; on any failure local state is untouched.
//! Refreshing replaces the local collection outright, so a completion made
//! between request and response is lost (last writer wins).

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::catalog::{default_quotes, default_suggestions, HabitSuggestion, Quote, SuggestionCategory};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::habit::{Habit, HabitDraft, HabitUpdate, NewHabitRecord};
use crate::notifications::{milestone_notification, Notification};
use crate::preferences::{PreferencesUpdate, UserPreferences};
use crate::remote::RemoteStore;
use crate::session::User;
use crate::stats::{compute_stats, HabitStats};

/// Version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted-relevant repository state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    pub version: u32,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

pub struct HabitRepository<R> {
    remote: R,
    clock: Box<dyn Clock>,
    habits: Vec<Habit>,
    suggestions: Vec<HabitSuggestion>,
    quotes: Vec<Quote>,
    notifications: Vec<Notification>,
    preferences: UserPreferences,
}

impl<R: RemoteStore> HabitRepository<R> {
    /// Empty repository backed by `remote`, using the system clock.
    pub fn new(remote: R) -> Self {
        Self::with_clock(remote, SystemClock)
    }

    pub fn with_clock(remote: R, clock: impl Clock + 'static) -> Self {
        Self {
            remote,
            clock: Box::new(clock),
            habits: Vec::new(),
            suggestions: default_suggestions(),
            quotes: default_quotes(),
            notifications: Vec::new(),
            preferences: UserPreferences::default(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ---- read projections ----

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Stats for the current habits as of today. Recomputed on every call.
    pub fn stats(&self) -> HabitStats {
        compute_stats(&self.habits, self.clock.today())
    }

    pub fn random_quote(&self) -> Option<&Quote> {
        self.quotes.choose(&mut rand::thread_rng())
    }

    pub fn suggestions_by_category(&self, category: SuggestionCategory) -> Vec<&HabitSuggestion> {
        self.suggestions
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    // ---- remote-backed operations ----

    /// Replace the local habit collection with the remote listing.
    ///
    /// Does nothing when no user is signed in.
    pub async fn fetch_habits(&mut self, user: Option<&User>) -> Result<()> {
        let Some(user) = user else {
            tracing::debug!("fetch skipped: no signed-in user");
            return Ok(());
        };
        let mut habits = self.remote.list(&user.id).await?;
        let today = self.clock.today();
        for habit in &mut habits {
            habit.refresh_streak(today);
        }
        tracing::info!(user = %user.id, count = habits.len(), "fetched habits");
        self.habits = habits;
        Ok(())
    }

    pub async fn add_habit(&mut self, user: &User, draft: HabitDraft) -> Result<()> {
        draft.validate()?;
        let record = NewHabitRecord {
            draft,
            user_id: user.id.clone(),
        };
        self.remote.create(&record).await?;
        tracing::debug!(name = %record.draft.name, "habit created remotely");
        self.fetch_habits(Some(user)).await
    }

    pub async fn edit_habit(&mut self, user: &User, id: &str, update: HabitUpdate) -> Result<()> {
        update.validate()?;
        self.remote.update(id, &update).await?;
        tracing::debug!(id, "habit updated remotely");
        self.fetch_habits(Some(user)).await
    }

    pub async fn delete_habit(&mut self, user: &User, id: &str) -> Result<()> {
        self.remote.delete(id).await?;
        tracing::debug!(id, "habit deleted remotely");
        self.fetch_habits(Some(user)).await
    }

    // ---- local operations ----

    /// Mark `id` as completed on `day`.
    ///
    /// Returns whether anything changed. Completing an already completed day
    /// or an unknown habit is a no-op and never notifies.
    pub fn complete_habit(&mut self, id: &str, day: NaiveDate) -> bool {
        let now = self.clock.now();
        let today = self.clock.today();
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        if !habit.completed_dates.insert(day) {
            return false;
        }
        habit.last_updated = Some(now);
        habit.refresh_streak(today);
        tracing::debug!(
            habit = %habit.name,
            %day,
            streak = habit.streak,
            "completed habit"
        );

        if let Some(notification) = milestone_notification(&habit.name, habit.streak, now) {
            tracing::info!(message = %notification.message, "milestone reached");
            self.notifications.push(notification);
        }
        true
    }

    /// Remove the completion of `id` on `day`, if present.
    ///
    /// `longest_streak` is never lowered and no notification is emitted.
    pub fn uncomplete_habit(&mut self, id: &str, day: NaiveDate) -> bool {
        let now = self.clock.now();
        let today = self.clock.today();
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        let removed = habit.completed_dates.remove(&day);
        habit.last_updated = Some(now);
        habit.refresh_streak(today);
        tracing::debug!(
            habit = %habit.name,
            %day,
            streak = habit.streak,
            "uncompleted habit"
        );
        removed
    }

    pub fn mark_notification_read(&mut self, id: &str) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
    }

    /// Drop every read notification; unread ones stay.
    pub fn clear_read_notifications(&mut self) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.read);
        let cleared = before - self.notifications.len();
        tracing::debug!(cleared, "cleared read notifications");
        cleared
    }

    pub fn update_preferences(&mut self, update: &PreferencesUpdate) {
        self.preferences.merge(update);
        tracing::debug!(preferences = ?self.preferences, "updated preferences");
    }

    /// Discard session-scoped state on sign-out. Preferences are kept.
    pub fn end_session(&mut self) {
        self.habits.clear();
        self.notifications.clear();
    }

    // ---- persistence ----

    pub fn snapshot(&self) -> RepositorySnapshot {
        RepositorySnapshot {
            version: SNAPSHOT_VERSION,
            habits: self.habits.clone(),
            notifications: self.notifications.clone(),
            preferences: self.preferences.clone(),
        }
    }

    /// Load a previously taken snapshot, refreshing streaks for today.
    ///
    /// The version is not checked here; [`crate::StateDb::load_snapshot`]
    /// rejects snapshots from other format versions.
    pub fn restore(&mut self, snapshot: RepositorySnapshot) {
        let today = self.clock.today();
        self.habits = snapshot.habits;
        for habit in &mut self.habits {
            habit.refresh_streak(today);
        }
        self.notifications = snapshot.notifications;
        self.preferences = snapshot.preferences;
    }

    pub(crate) fn replace_habits(&mut self, mut habits: Vec<Habit>) {
        let today = self.clock.today();
        for habit in &mut habits {
            habit.refresh_streak(today);
        }
        self.habits = habits;
    }

    /// Serialize habits and preferences to the export format.
    pub fn export_user_data(&self) -> Result<String> {
        crate::transfer::export_user_data(self)
    }

    /// Restore habits and preferences from exported text; `false` on any failure.
    pub fn import_user_data(&mut self, text: &str) -> bool {
        crate::transfer::import_user_data(self, text)
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use crate::remote::{InMemoryRemoteStore, RemoteError};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn user() -> User {
        User::new("u-1", "u1@example.com")
    }

    async fn repo_with_habit(name: &str) -> (HabitRepository<Arc<InMemoryRemoteStore>>, String) {
        let store = Arc::new(InMemoryRemoteStore::new());
        let mut repo = HabitRepository::with_clock(store, FixedClock::at_day(today()));
        repo.add_habit(&user(), HabitDraft::new(name)).await.unwrap();
        let id = repo.habits()[0].id.clone();
        (repo, id)
    }

    struct FailingStore;

    #[async_trait]
    impl RemoteStore for FailingStore {
        async fn list(&self, _user_id: &str) -> Result<Vec<Habit>, RemoteError> {
            Err(RemoteError::Request("offline".into()))
        }
        async fn create(&self, _record: &NewHabitRecord) -> Result<(), RemoteError> {
            Err(RemoteError::Request("offline".into()))
        }
        async fn update(&self, id: &str, _update: &HabitUpdate) -> Result<(), RemoteError> {
            Err(RemoteError::NotFound(id.to_string()))
        }
        async fn delete(&self, _id: &str) -> Result<(), RemoteError> {
            Err(RemoteError::Http {
                status: 500,
                message: "boom".into(),
            })
        }
    }

    #[tokio::test]
    async fn fetch_without_user_is_a_noop() {
        let mut repo = HabitRepository::with_clock(FailingStore, FixedClock::at_day(today()));
        repo.fetch_habits(None).await.unwrap();
        assert!(repo.habits().is_empty());
    }

    #[tokio::test]
    async fn add_habit_refreshes_from_remote() {
        let (repo, id) = repo_with_habit("Read").await;
        assert_eq!(repo.habits().len(), 1);
        assert_eq!(repo.habit(&id).unwrap().name, "Read");
        assert_eq!(repo.remote().len(), 1);
    }

    #[tokio::test]
    async fn add_habit_rejects_empty_name_without_calling_remote() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let mut repo = HabitRepository::with_clock(store, FixedClock::at_day(today()));
        let err = repo.add_habit(&user(), HabitDraft::new("  ")).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(repo.remote().is_empty());
    }

    #[tokio::test]
    async fn remote_failures_leave_state_unchanged() {
        let mut repo = HabitRepository::with_clock(FailingStore, FixedClock::at_day(today()));
        let snapshot = RepositorySnapshot {
            version: SNAPSHOT_VERSION,
            habits: vec![serde_json::from_str(
                r#"{"id":"h1","name":"Read","created":"2024-01-01T00:00:00Z"}"#,
            )
            .unwrap()],
            notifications: Vec::new(),
            preferences: UserPreferences::default(),
        };
        repo.restore(snapshot.clone());

        let err = repo.add_habit(&user(), HabitDraft::new("Run")).await.unwrap_err();
        assert!(matches!(err, CoreError::Sync(_)));

        let err = repo
            .edit_habit(&user(), "h1", HabitUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        let err = repo.delete_habit(&user(), "h1").await.unwrap_err();
        assert!(matches!(err, CoreError::Sync(msg) if msg.contains("boom")));

        assert_eq!(repo.snapshot(), snapshot);
    }

    #[tokio::test]
    async fn edit_and_delete_round_trip_through_remote() {
        let (mut repo, id) = repo_with_habit("Read").await;
        let update = HabitUpdate {
            name: Some("Read fiction".to_string()),
            ..Default::default()
        };
        repo.edit_habit(&user(), &id, update).await.unwrap();
        assert_eq!(repo.habit(&id).unwrap().name, "Read fiction");

        let err = repo
            .edit_habit(&user(), "missing", HabitUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        repo.delete_habit(&user(), &id).await.unwrap();
        assert!(repo.habits().is_empty());
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let (mut repo, id) = repo_with_habit("Read").await;
        assert!(repo.complete_habit(&id, today()));
        let after_first = repo.snapshot();
        assert!(!repo.complete_habit(&id, today()));
        assert_eq!(repo.snapshot(), after_first);

        let habit = repo.habit(&id).unwrap();
        assert_eq!(habit.completed_dates.len(), 1);
        assert_eq!(habit.streak, 1);
        assert!(habit.last_updated.is_some());
    }

    #[tokio::test]
    async fn unknown_ids_are_ignored_by_local_operations() {
        let (mut repo, _) = repo_with_habit("Read").await;
        assert!(!repo.complete_habit("nope", today()));
        assert!(!repo.uncomplete_habit("nope", today()));
        repo.mark_notification_read("nope");
        assert!(repo.notifications().is_empty());
    }

    #[tokio::test]
    async fn uncomplete_then_complete_restores_streak_and_keeps_longest() {
        let (mut repo, id) = repo_with_habit("Read").await;
        for offset in (0..3).rev() {
            repo.complete_habit(&id, today() - Duration::days(offset));
        }
        assert_eq!(repo.habit(&id).unwrap().streak, 3);

        assert!(repo.uncomplete_habit(&id, today() - Duration::days(1)));
        let habit = repo.habit(&id).unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.longest_streak, 3);

        repo.complete_habit(&id, today() - Duration::days(1));
        let habit = repo.habit(&id).unwrap();
        assert_eq!(habit.streak, 3);
        assert_eq!(habit.longest_streak, 3);
    }

    #[tokio::test]
    async fn uncomplete_missing_day_still_touches_last_updated() {
        let (mut repo, id) = repo_with_habit("Read").await;
        assert!(repo.habit(&id).unwrap().last_updated.is_none());
        assert!(!repo.uncomplete_habit(&id, today()));
        assert!(repo.habit(&id).unwrap().last_updated.is_some());
    }

    #[tokio::test]
    async fn seventh_day_notifies_once_and_eighth_does_not() {
        let (mut repo, id) = repo_with_habit("Meditate").await;
        // complete oldest first so the streak reaches 7 on today's entry
        for offset in (1..7).rev() {
            repo.complete_habit(&id, today() - Duration::days(offset));
        }
        assert!(repo.notifications().is_empty());

        repo.complete_habit(&id, today());
        assert_eq!(repo.habit(&id).unwrap().streak, 7);
        assert_eq!(repo.notifications().len(), 1);
        assert!(repo.notifications()[0].message.contains("week"));

        repo.complete_habit(&id, today());
        assert_eq!(repo.notifications().len(), 1);

        repo.complete_habit(&id, today() - Duration::days(7));
        assert_eq!(repo.habit(&id).unwrap().streak, 8);
        assert_eq!(repo.notifications().len(), 1);
    }

    #[tokio::test]
    async fn uncomplete_never_notifies() {
        let (mut repo, id) = repo_with_habit("Meditate").await;
        for offset in (0..8).rev() {
            repo.complete_habit(&id, today() - Duration::days(offset));
        }
        let count = repo.notifications().len();
        // dropping the oldest day takes the streak from 8 back to 7
        repo.uncomplete_habit(&id, today() - Duration::days(7));
        assert_eq!(repo.habit(&id).unwrap().streak, 7);
        assert_eq!(repo.notifications().len(), count);
    }

    #[tokio::test]
    async fn clear_keeps_unread_notifications() {
        let (mut repo, walk) = repo_with_habit("Walk").await;
        repo.add_habit(&user(), HabitDraft::new("Stretch")).await.unwrap();
        let stretch = repo
            .habits()
            .iter()
            .find(|h| h.name == "Stretch")
            .unwrap()
            .id
            .clone();
        for id in [&walk, &stretch] {
            for offset in (0..7).rev() {
                repo.complete_habit(id, today() - Duration::days(offset));
            }
        }
        assert_eq!(repo.notifications().len(), 2);

        let first = repo.notifications()[0].id.clone();
        repo.mark_notification_read(&first);
        repo.mark_notification_read(&first);
        assert_eq!(repo.unread_count(), 1);

        assert_eq!(repo.clear_read_notifications(), 1);
        assert_eq!(repo.notifications().len(), 1);
        assert!(!repo.notifications()[0].read);
        assert!(repo.notifications()[0].message.contains("Stretch"));
    }

    #[tokio::test]
    async fn fetch_replaces_unsynced_local_completions() {
        let (mut repo, id) = repo_with_habit("Read").await;
        repo.complete_habit(&id, today());
        repo.fetch_habits(Some(&user())).await.unwrap();
        assert!(repo.habit(&id).unwrap().completed_dates.is_empty());
    }

    #[tokio::test]
    async fn end_session_keeps_preferences() {
        let (mut repo, _) = repo_with_habit("Read").await;
        repo.update_preferences(&PreferencesUpdate {
            week_starts_on: Some(0),
            ..Default::default()
        });
        repo.end_session();
        assert!(repo.habits().is_empty());
        assert_eq!(repo.preferences().week_starts_on, 0);
    }

    #[test]
    fn restore_recomputes_lapsed_streaks() {
        let mut repo =
            HabitRepository::with_clock(InMemoryRemoteStore::new(), FixedClock::at_day(today()));
        let habit: Habit = serde_json::from_str(
            r#"{"id":"h1","name":"Read","created":"2024-01-01T00:00:00Z",
                "completedDates":["2024-03-01","2024-03-02"],"streak":2,"longestStreak":2}"#,
        )
        .unwrap();
        repo.restore(RepositorySnapshot {
            version: SNAPSHOT_VERSION,
            habits: vec![habit],
            notifications: Vec::new(),
            preferences: UserPreferences::default(),
        });
        let habit = repo.habit("h1").unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.longest_streak, 2);
    }

    #[test]
    fn quotes_and_suggestions_come_from_catalog() {
        let repo =
            HabitRepository::with_clock(InMemoryRemoteStore::new(), FixedClock::at_day(today()));
        assert!(repo.random_quote().is_some());
        let social = repo.suggestions_by_category(SuggestionCategory::Social);
        assert_eq!(social.len(), 2);
        assert!(social.iter().all(|s| s.category == SuggestionCategory::Social));
    }
}
