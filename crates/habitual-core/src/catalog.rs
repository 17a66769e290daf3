//! Built-in habit suggestions and motivational quotes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Health,
    Productivity,
    Mindfulness,
    Social,
    Skills,
}

impl std::str::FromStr for SuggestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "productivity" => Ok(Self::Productivity),
            "mindfulness" => Ok(Self::Mindfulness),
            "social" => Ok(Self::Social),
            "skills" => Ok(Self::Skills),
            other => Err(format!("unknown suggestion category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSuggestion {
    pub id: String,
    pub text: String,
    pub category: SuggestionCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

const SUGGESTIONS: [(&str, SuggestionCategory); 20] = [
    ("Drink 8 glasses of water", SuggestionCategory::Health),
    ("Meditate for 10 minutes", SuggestionCategory::Mindfulness),
    ("Read for 30 minutes", SuggestionCategory::Skills),
    ("Exercise for 30 minutes", SuggestionCategory::Health),
    ("Write in a journal", SuggestionCategory::Mindfulness),
    ("Practice a language for 15 minutes", SuggestionCategory::Skills),
    ("Call a friend or family member", SuggestionCategory::Social),
    ("Plan your day each morning", SuggestionCategory::Productivity),
    ("Take a walk outside", SuggestionCategory::Health),
    ("Practice gratitude", SuggestionCategory::Mindfulness),
    ("Learn something new", SuggestionCategory::Skills),
    ("Clean for 15 minutes", SuggestionCategory::Productivity),
    ("Stretch for 10 minutes", SuggestionCategory::Health),
    ("Cook a healthy meal", SuggestionCategory::Health),
    ("Limit social media to 30 minutes", SuggestionCategory::Productivity),
    ("Drink green tea instead of coffee", SuggestionCategory::Health),
    ("Practice deep breathing for 5 minutes", SuggestionCategory::Mindfulness),
    ("Learn 3 new vocabulary words", SuggestionCategory::Skills),
    ("Send a thank you message", SuggestionCategory::Social),
    ("Set 3 priorities for the day", SuggestionCategory::Productivity),
];

const QUOTES: [(&str, &str); 10] = [
    ("The secret of getting ahead is getting started.", "Mark Twain"),
    ("Small changes eventually add up to huge results.", "Unknown"),
    ("Habits are the compound interest of self-improvement.", "James Clear"),
    (
        "We are what we repeatedly do. Excellence, then, is not an act, but a habit.",
        "Aristotle",
    ),
    (
        "You'll never change your life until you change something you do daily.",
        "John C. Maxwell",
    ),
    ("Champions keep playing until they get it right.", "Billie Jean King"),
    ("The only way to do great work is to love what you do.", "Steve Jobs"),
    (
        "Success is the sum of small efforts, repeated day in and day out.",
        "Robert Collier",
    ),
    (
        "The difference between ordinary and extraordinary is that little extra.",
        "Jimmy Johnson",
    ),
    ("Your daily habits define your future.", "Unknown"),
];

/// The built-in suggestion list, ids numbered from 1.
pub fn default_suggestions() -> Vec<HabitSuggestion> {
    SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, (text, category))| HabitSuggestion {
            id: (i + 1).to_string(),
            text: text.to_string(),
            category: *category,
        })
        .collect()
}

pub fn default_quotes() -> Vec<Quote> {
    QUOTES
        .iter()
        .map(|(text, author)| Quote {
            text: text.to_string(),
            author: author.to_string(),
        })
        .collect()
}
