//! # Habitual Core Library
//!
//! Client-side habit state engine. It owns the habit collection for a
//! session, derives streaks and statistics, raises milestone notifications
//! and moves the whole data set in and out through an export document. The
//! CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Streaks**: pure calendar-day arithmetic over completion sets
//! - **Repository**: explicitly constructed, owns state, talks to a
//!   [`RemoteStore`] for create/edit/delete and refreshes afterwards
//! - **Stats**: recomputed on demand, never cached
//! - **Transfer**: JSON export/import that fails closed
//! - **Storage**: SQLite snapshots and TOML configuration for hosts
//!
//! ## Key Components
//!
//! - [`HabitRepository`]: state owner and mutation surface
//! - [`calculate_streak`]: streak rule
//! - [`compute_stats`]: cross-habit summary
//! - [`RemoteStore`]: backend abstraction with HTTP and in-memory versions

pub mod catalog;
pub mod clock;
pub mod error;
pub mod habit;
pub mod notifications;
pub mod preferences;
pub mod remote;
pub mod repository;
pub mod session;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod transfer;

pub use catalog::{HabitSuggestion, Quote, SuggestionCategory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{Frequency, Habit, HabitDraft, HabitUpdate};
pub use notifications::Notification;
pub use preferences::{PreferencesUpdate, Theme, UserPreferences};
pub use remote::{HttpRemoteStore, InMemoryRemoteStore, RemoteError, RemoteStore};
pub use repository::{HabitRepository, RepositorySnapshot};
pub use session::User;
pub use stats::{compute_stats, HabitStats};
pub use storage::{Config, StateDb};
pub use streak::calculate_streak;
pub use transfer::{export_user_data, import_user_data};
