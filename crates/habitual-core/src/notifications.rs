//! Milestone notifications.
//!
//! The policy runs only when a completion adds a new day. It looks at the
//! new streak value and yields at most one notification per event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification stamped `now`.
    pub fn new(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            read: false,
            created_at: now,
        }
    }
}

/// Streak milestone reached by a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Week,
    Month,
    Century(u32),
}

impl Milestone {
    /// Milestone for a freshly computed streak, if any.
    ///
    /// Checked in order week, month, century so a single value never maps
    /// to more than one milestone.
    pub fn for_streak(streak: u32) -> Option<Self> {
        match streak {
            7 => Some(Milestone::Week),
            30 => Some(Milestone::Month),
            s if s > 0 && s % 100 == 0 => Some(Milestone::Century(s)),
            _ => None,
        }
    }

    pub fn message(&self, habit_name: &str) -> String {
        match self {
            Milestone::Week => format!("🔥 1 week streak for \"{habit_name}\"! Keep it up!"),
            Milestone::Month => format!("🎉 Amazing! 30 day streak for \"{habit_name}\"!"),
            Milestone::Century(days) => {
                format!("🏆 Incredible! {days} day streak for \"{habit_name}\"!")
            }
        }
    }
}

/// Notification for a completion that produced `new_streak`, if it is a milestone.
pub fn milestone_notification(
    habit_name: &str,
    new_streak: u32,
    now: DateTime<Utc>,
) -> Option<Notification> {
    Milestone::for_streak(new_streak).map(|m| Notification::new(m.message(habit_name), now))
}
