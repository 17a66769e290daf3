//! Streak calculation over calendar-day completion sets.
//!
//! A streak is the run of consecutive completed days ending at the most
//! recent completion, provided that completion is today or yesterday. The
//! one-day grace only covers today's slot not being filled yet; gaps inside
//! the history always break the run. A history whose latest day lies after
//! `today` has lapsed as well.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Calculate the current streak for a set of completed days.
///
/// Returns 0 for an empty set or when the most recent completion is neither
/// today nor yesterday. The result depends only on `completed` and `today`.
pub fn calculate_streak(completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&most_recent) = completed.last() else {
        return 0;
    };

    let gap = (today - most_recent).num_days();
    if !(0..=1).contains(&gap) {
        return 0;
    }

    let mut streak = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in completed.iter().rev() {
        if let Some(prev) = previous {
            if (prev - day).num_days() > 1 {
                break;
            }
        }
        streak += 1;
        previous = Some(day);
    }
    streak
}
