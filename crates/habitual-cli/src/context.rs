//! Per-invocation state: config, database, repository and signed-in user.

use habitual_core::habit::parse_calendar_day;
use habitual_core::{
    Config, Habit, HabitRepository, HttpRemoteStore, InMemoryRemoteStore, RemoteStore, StateDb,
    User,
};

pub type Repo = HabitRepository<Box<dyn RemoteStore>>;

pub struct Context {
    pub config: Config,
    pub db: StateDb,
    pub repo: Repo,
    pub user: Option<User>,
}

impl Context {
    /// Load config, open the state database and restore the last snapshot.
    ///
    /// Without a configured backend the saved habits seed an in-memory
    /// store, so create/edit/delete work offline against local data.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let db = StateDb::open()?;
        let user = db.session_user()?;
        let snapshot = db.load_snapshot()?;

        let remote: Box<dyn RemoteStore> = if config.remote.is_online() {
            Box::new(HttpRemoteStore::new(
                &config.remote.base_url,
                config.remote.timeout(),
            )?)
        } else {
            let owner = user.as_ref().map(|u| u.id.as_str()).unwrap_or_default();
            let habits = snapshot
                .as_ref()
                .map(|s| s.habits.clone())
                .unwrap_or_default();
            Box::new(InMemoryRemoteStore::with_habits(owner, habits))
        };

        let mut repo = HabitRepository::new(remote);
        if let Some(snapshot) = snapshot {
            repo.restore(snapshot);
        }
        tracing::debug!(online = config.remote.is_online(), "context opened");

        Ok(Self {
            config,
            db,
            repo,
            user,
        })
    }

    /// Persist the repository snapshot.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.db.save_snapshot(&self.repo.snapshot())?;
        Ok(())
    }

    pub fn require_user(&self) -> Result<&User, Box<dyn std::error::Error>> {
        self.user
            .as_ref()
            .ok_or_else(|| "not signed in; run `habitual account login <id> <email>` first".into())
    }

    /// Find a habit by exact id, or by case-insensitive name.
    pub fn resolve_habit(&self, key: &str) -> Result<&Habit, Box<dyn std::error::Error>> {
        let habits = self.repo.habits();
        if let Some(habit) = habits.iter().find(|h| h.id == key) {
            return Ok(habit);
        }
        let matches: Vec<&Habit> = habits
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(key))
            .collect();
        match matches.as_slice() {
            [habit] => Ok(habit),
            [] => Err(format!("no habit with id or name '{key}'").into()),
            _ => Err(format!("'{key}' matches several habits; use the id").into()),
        }
    }
}

/// Clap value parser for `YYYY-MM-DD` days.
pub fn parse_day(raw: &str) -> Result<chrono::NaiveDate, String> {
    parse_calendar_day(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}
