/*!
 * Language detection confidence heuristics.
 *
 * The endpoint reports a detected language but no confidence, so the
 * confidence shown to users is derived from the text itself: longer text
 * is trusted more, very short or mixed-script text less.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::language_utils;

/// Script blocks the heuristic distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Cyrillic,
    Arabic,
    Cjk,
}

impl Script {
    /// Classify a character by code point; `None` for everything else
    pub fn of(c: char) -> Option<Self> {
        match c as u32 {
            0x0041..=0x007A => Some(Self::Latin),
            0x0400..=0x04FF => Some(Self::Cyrillic),
            0x0600..=0x06FF => Some(Self::Arabic),
            0x4E00..=0x9FFF => Some(Self::Cjk),
            _ => None,
        }
    }
}

/// Result of a detection call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Detected language code, or "unknown"
    pub language: String,
    /// Heuristic confidence in [0, 100]
    pub confidence: u8,
    /// Human-readable name of `language`
    pub language_name: String,
}

impl Detection {
    pub fn new(language: impl Into<String>, text: &str) -> Self {
        let language = language.into();
        let language_name = language_utils::display_name(&language);
        Self {
            confidence: calculate_confidence(text),
            language,
            language_name,
        }
    }

    /// Placeholder used when detection could not be performed
    pub fn unknown() -> Self {
        Self {
            language: "unknown".to_string(),
            confidence: 0,
            language_name: "Unknown".to_string(),
        }
    }
}

/// Distinct scripts present in `text`, in a stable order
pub fn detect_scripts(text: &str) -> BTreeSet<Script> {
    text.chars().filter_map(Script::of).collect()
}

/// Confidence heuristic: base 70, adjusted by length and script mix
pub fn calculate_confidence(text: &str) -> u8 {
    let length = text.chars().count();
    let mut confidence: i32 = 70;

    if length > 100 {
        confidence += 10;
    }
    if length > 300 {
        confidence += 10;
    }
    if length < 20 {
        confidence -= 20;
    }
    if detect_scripts(text).len() > 1 {
        confidence -= 15;
    }

    confidence.clamp(0, 100) as u8
}
