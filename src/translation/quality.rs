/*!
 * Heuristic translation quality scoring.
 *
 * The score compares surface features of the original and the translation
 * (length, word count, punctuation, leading capital). It says nothing about
 * meaning; it only flags translations whose shape drifted from the source.
 */

use serde::{Deserialize, Serialize};

/// Score every translation starts from
pub const BASE_SCORE: u32 = 70;

/// Punctuation marks compared between original and translation
const PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Score with its star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Score capped at 100
    pub score: u32,
    /// Rating from 1 to 5
    pub stars: u8,
}

impl QualityScore {
    pub fn of(original: &str, translation: &str) -> Self {
        let score = score_translation(original, translation);
        Self {
            score,
            stars: stars_for(score),
        }
    }
}

fn punctuation_count(text: &str) -> i64 {
    text.chars().filter(|c| PUNCTUATION.contains(c)).count() as i64
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Texts that start with a letter lacking a lower-case form, or with a
/// non-letter, count as capitalized
fn starts_capitalized(text: &str) -> bool {
    text.chars().next().is_some_and(|c| !c.is_lowercase())
}

fn ratio_within(numerator: usize, denominator: usize, low: f64, high: f64) -> bool {
    if denominator == 0 {
        return false;
    }
    let ratio = numerator as f64 / denominator as f64;
    ratio > low && ratio < high
}

/// Score a translation against its original
pub fn score_translation(original: &str, translation: &str) -> u32 {
    let mut score = BASE_SCORE;

    if ratio_within(translation.chars().count(), original.chars().count(), 0.5, 2.0) {
        score += 10;
    }

    if ratio_within(word_count(translation), word_count(original), 0.6, 1.5) {
        score += 10;
    }

    if (punctuation_count(original) - punctuation_count(translation)).abs() <= 2 {
        score += 5;
    }

    if starts_capitalized(original) && starts_capitalized(translation) {
        score += 5;
    }

    score.min(100)
}

/// Star rating for a score
pub fn stars_for(score: u32) -> u8 {
    match score {
        90.. => 5,
        75..=89 => 4,
        60..=74 => 3,
        45..=59 => 2,
        _ => 1,
    }
}
