//! Cross-habit statistics.
//!
//! Stats are derived on every call and never cached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Current streak of one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStreak {
    pub habit_id: String,
    pub streak: u32,
}

/// Summary over the whole habit collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub total_habits: usize,
    pub completed_today: usize,
    pub current_streaks: Vec<HabitStreak>,
    /// Id of the habit with the highest streak, if any streak is above zero.
    pub most_consistent: Option<String>,
}

impl HabitStats {
    /// Share of habits completed today, as a rounded percentage.
    pub fn completion_rate(&self) -> u32 {
        if self.total_habits == 0 {
            return 0;
        }
        ((self.completed_today as f64 / self.total_habits as f64) * 100.0).round() as u32
    }

    /// Highest current streak, 0 when there are no habits.
    pub fn top_streak(&self) -> u32 {
        self.current_streaks.iter().map(|s| s.streak).max().unwrap_or(0)
    }
}

/// Compute stats for `habits` as of `today`.
///
/// `most_consistent` goes to the first habit in input order holding the
/// highest streak; a habit qualifies only with a streak above zero.
pub fn compute_stats(habits: &[Habit], today: NaiveDate) -> HabitStats {
    let mut ranked: Vec<&Habit> = habits.iter().collect();
    // sort_by is stable, so equal streaks keep input order
    ranked.sort_by(|a, b| b.streak.cmp(&a.streak));

    HabitStats {
        total_habits: habits.len(),
        completed_today: habits.iter().filter(|h| h.is_completed_on(today)).count(),
        current_streaks: habits
            .iter()
            .map(|h| HabitStreak {
                habit_id: h.id.clone(),
                streak: h.streak,
            })
            .collect(),
        most_consistent: ranked
            .first()
            .filter(|h| h.streak > 0)
            .map(|h| h.id.clone()),
    }
}
