use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for language code handling
///
/// The translation endpoint speaks ISO 639-1 codes, sometimes with a region
/// suffix (`zh-CN`, `pt-PT`), plus the pseudo-code `auto`.

/// Code used to request source-language detection
pub const AUTO_DETECT: &str = "auto";

/// Strip any region suffix and normalize case: `zh-CN` -> `zh`
pub fn base_code(code: &str) -> String {
    let trimmed = code.trim();
    let base = trimmed
        .split(['-', '_'])
        .next()
        .unwrap_or(trimmed);
    base.to_lowercase()
}

/// Resolve a language code to an isolang language
fn lookup(code: &str) -> Option<Language> {
    let base = base_code(code);
    match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    if code.trim().eq_ignore_ascii_case(AUTO_DETECT) {
        return Ok("Detect language".to_string());
    }

    let lang = lookup(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Language name for display, falling back to the raw code
pub fn display_name(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.to_string())
}
