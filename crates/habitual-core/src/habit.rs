//! Habit records, drafts and partial updates.
//!
//! The serialized form uses the camelCase keys of the transport format
//! (`completedDates`, `longestStreak`, ...). Completion days are stored as a
//! set, so duplicates collapse on decode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::streak::calculate_streak;

/// Icon keys understood by the client.
pub const ICON_KEYS: [&str; 11] = [
    "activity", "award", "book", "coffee", "droplet", "dumbbell", "flame", "heart", "music",
    "pencil", "zap",
];

/// Icon used when a habit names an unknown key.
pub const DEFAULT_ICON: &str = "activity";

/// Color assigned to drafts that do not pick one (indigo).
pub const DEFAULT_COLOR: &str = "#6366F1";

/// Resolve an icon key, falling back to [`DEFAULT_ICON`].
pub fn resolve_icon(key: &str) -> &'static str {
    ICON_KEYS
        .iter()
        .find(|k| **k == key)
        .copied()
        .unwrap_or(DEFAULT_ICON)
}

/// Whether `color` is a `#rgb` or `#rrggbb` hex color.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Parse a calendar day from `YYYY-MM-DD` or an ISO-8601 timestamp.
///
/// Timestamps keep only their date part; the time of day is ignored.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// How often a habit is meant to be performed.
///
/// Stored for display; streaks always use daily consecutiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl std::str::FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(ValidationError::InvalidValue {
                field: "frequency".to_string(),
                message: format!("unknown frequency '{other}'"),
            }),
        }
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(alias = "createdAt", alias = "created_at", default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default, with = "day_set", alias = "completed_dates")]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default, alias = "longest_streak")]
    pub longest_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Habit {
    /// Whether the habit was completed on `day`.
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Icon key to render, with unknown keys mapped to the default.
    pub fn icon_key(&self) -> &'static str {
        resolve_icon(&self.icon)
    }

    /// Recompute `streak` for `today` and raise `longest_streak` if needed.
    ///
    /// `longest_streak` never decreases.
    pub fn refresh_streak(&mut self, today: NaiveDate) {
        self.streak = calculate_streak(&self.completed_dates, today);
        self.longest_streak = self.longest_streak.max(self.streak);
    }
}

/// Input for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl HabitDraft {
    /// Draft with default icon, color and daily frequency.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            frequency: Frequency::Daily,
            icon: default_icon(),
            color: default_color(),
        }
    }

    /// Reject drafts that should have been caught before reaching the repository.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_hex_color(&self.color) {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Draft as sent to the remote store, tagged with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabitRecord {
    #[serde(flatten)]
    pub draft: HabitDraft,
    pub user_id: String,
}

/// Partial update of user-editable habit fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        *self == HabitUpdate::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
        }
        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(ValidationError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    /// Apply the present fields to `habit`.
    pub fn apply_to(&self, habit: &mut Habit) {
        if let Some(name) = &self.name {
            habit.name = name.clone();
        }
        if let Some(description) = &self.description {
            habit.description = description.clone();
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(icon) = &self.icon {
            habit.icon = icon.clone();
        }
        if let Some(color) = &self.color {
            habit.color = color.clone();
        }
    }
}

/// Serde adapter for completion-day sets.
///
/// Encodes as sorted `YYYY-MM-DD` strings; decodes days or timestamps.
mod day_set {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S: Serializer>(days: &BTreeSet<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(days.iter().map(|d| d.format("%Y-%m-%d").to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<NaiveDate>, D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        raw.iter()
            .map(|s| {
                parse_calendar_day(s)
                    .ok_or_else(|| D::Error::custom(format!("invalid calendar day '{s}'")))
            })
            .collect()
    }
}
