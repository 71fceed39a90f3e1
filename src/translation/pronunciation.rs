/*!
 * Rough pronunciation guides built from substring substitutions.
 */

/// Pronunciation strategy selected by language code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronunciationScheme {
    English,
    Spanish,
    French,
    German,
    /// No table for this language: the text is shown bracketed
    Passthrough,
}

/// Ordered substitutions; longer patterns come before their prefixes
const ENGLISH_RULES: &[(&str, &str)] = &[("tion", "shun"), ("th", "θ"), ("ch", "tʃ"), ("sh", "ʃ")];
const SPANISH_RULES: &[(&str, &str)] = &[("ll", "y"), ("ñ", "ny")];
const FRENCH_RULES: &[(&str, &str)] = &[("eau", "o"), ("oi", "wa")];
const GERMAN_RULES: &[(&str, &str)] = &[("sch", "ʃ"), ("ch", "χ")];

impl PronunciationScheme {
    /// Registry lookup by language code; unknown codes fall back to passthrough
    pub fn for_language(code: &str) -> Self {
        match code {
            "en" => Self::English,
            "es" => Self::Spanish,
            "fr" => Self::French,
            "de" => Self::German,
            _ => Self::Passthrough,
        }
    }

    fn rules(self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            Self::English => Some(ENGLISH_RULES),
            Self::Spanish => Some(SPANISH_RULES),
            Self::French => Some(FRENCH_RULES),
            Self::German => Some(GERMAN_RULES),
            Self::Passthrough => None,
        }
    }

    /// Apply this scheme to `text`
    pub fn apply(self, text: &str) -> String {
        match self.rules() {
            Some(rules) => rules
                .iter()
                .fold(text.to_lowercase(), |acc, &(pattern, replacement)| {
                    acc.replace(pattern, replacement)
                }),
            None => format!("[{}]", text),
        }
    }
}

/// Pronunciation guide for `text` in `language`
pub fn generate_pronunciation(text: &str, language: &str) -> String {
    PronunciationScheme::for_language(language).apply(text)
}
