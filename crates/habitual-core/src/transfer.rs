//! Export and import of user data.
//!
//! The export document is JSON with three top-level fields:
//!
//! ```json
//! { "habits": [...], "userPreferences": {...}, "exportDate": "2024-03-10T12:00:00Z" }
//! ```
//!
//! Import checks the whole document before touching the repository, so a
//! rejected import leaves state exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::habit::Habit;
use crate::preferences::{PreferencesUpdate, UserPreferences};
use crate::remote::RemoteStore;
use crate::repository::HabitRepository;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    habits: &'a [Habit],
    user_preferences: &'a UserPreferences,
    export_date: DateTime<Utc>,
}

/// Import payload after shape validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocument {
    habits: Vec<Habit>,
    #[serde(default)]
    user_preferences: Option<PreferencesUpdate>,
}

/// Why an import was rejected. Only ever logged; callers see `false`.
#[derive(Debug, thiserror::Error)]
enum ImportFormatError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("habits array missing")]
    MissingHabits,
}

/// Serialize the repository's habits and preferences with an export timestamp.
pub fn export_user_data<R: RemoteStore>(repo: &HabitRepository<R>) -> Result<String> {
    let document = ExportDocument {
        habits: repo.habits(),
        user_preferences: repo.preferences(),
        export_date: repo.now(),
    };
    Ok(serde_json::to_string(&document)?)
}

/// Replace habits and merge preferences from exported text.
///
/// Returns `false`, leaving the repository unchanged, when the text is not
/// JSON, has no `habits` array, or holds a habit record that does not decode.
pub fn import_user_data<R: RemoteStore>(repo: &mut HabitRepository<R>, text: &str) -> bool {
    match parse_import(text) {
        Ok(document) => {
            let count = document.habits.len();
            repo.replace_habits(document.habits);
            if let Some(update) = document.user_preferences {
                repo.update_preferences(&update);
            }
            tracing::info!(count, "imported habits");
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejected import");
            false
        }
    }
}

fn parse_import(text: &str) -> Result<ImportDocument, ImportFormatError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.get("habits").is_some_and(Value::is_array) {
        return Err(ImportFormatError::MissingHabits);
    }
    Ok(serde_json::from_value(value)?)
}
