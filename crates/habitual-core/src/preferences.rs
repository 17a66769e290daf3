//! User display preferences with merge-on-update semantics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Preferences owned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub theme: Theme,
    /// 0 is Sunday, 1 is Monday, and so on.
    #[serde(default = "default_week_start")]
    pub week_starts_on: u8,
    #[serde(default = "default_true")]
    pub show_completed_habits: bool,
    /// Reminder time of day as `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}

fn default_week_start() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            week_starts_on: default_week_start(),
            show_completed_habits: true,
            reminder_time: None,
        }
    }
}

impl UserPreferences {
    /// Overlay the fields present in `update`; absent fields keep their value.
    pub fn merge(&mut self, update: &PreferencesUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(day) = update.week_starts_on {
            self.week_starts_on = day;
        }
        if let Some(show) = update.show_completed_habits {
            self.show_completed_habits = show;
        }
        if let Some(time) = &update.reminder_time {
            self.reminder_time = Some(time.clone());
        }
    }
}

/// Partial preferences, as accepted by updates and imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_starts_on: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_completed_habits: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}
