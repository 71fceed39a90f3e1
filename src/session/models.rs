/*!
 * Session-specific models.
 *
 * These are the user-facing records kept between runs: past translations,
 * saved favorites, recently used target languages and UI preferences.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::language_utils::AUTO_DETECT;

/// A completed translation as shown in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub input: String,
    pub output: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create a new entry stamped now
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            input: input.into(),
            output: output.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            timestamp: Utc::now(),
        }
    }

    /// Case-insensitive substring match on input or output
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.input.to_lowercase().contains(&term) || self.output.to_lowercase().contains(&term)
    }

    /// Whether either side of the pair is `code`
    pub fn involves_language(&self, code: &str) -> bool {
        self.source_lang == code || self.target_lang == code
    }

    /// Whether this entry is the same input/output pair as `other`
    pub fn same_pair(&self, other: &HistoryEntry) -> bool {
        self.input == other.input && self.output == other.output
    }
}

/// Favorites share the history record shape
pub type Favorite = HistoryEntry;

/// A recently chosen target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLanguage {
    pub code: String,
    pub name: String,
}

/// History listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for HistoryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("Unknown history order '{}'", other)),
        }
    }
}

/// Filter applied when listing history
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Substring to look for in input or output
    pub term: Option<String>,
    /// Language on either side of the pair
    pub language: Option<String>,
    pub order: HistoryOrder,
}

/// Selected languages and display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub source_language: String,
    pub target_language: String,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            source_language: AUTO_DETECT.to_string(),
            target_language: "en".to_string(),
            dark_mode: false,
        }
    }
}
