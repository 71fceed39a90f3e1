/*!
 * Alternative translations.
 *
 * Besides the primary translation, text long enough to split is
 * re-translated in two halves concurrently and the halves are joined. The
 * halves lose some sentence context, which is what makes the result differ.
 */

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::core::TranslationService;
use crate::errors::ProviderError;

/// At most this many alternatives are returned
pub const MAX_ALTERNATIVES: usize = 4;

/// How an alternative was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlternativeMethod {
    Primary,
    Chunked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub text: String,
    pub confidence: u8,
    pub method: AlternativeMethod,
}

/// Split words into two halves, the first one taking the odd word
pub fn chunk_text(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    let chunk_size = words.len().div_ceil(2).max(1);
    words.chunks(chunk_size).map(|chunk| chunk.join(" ")).collect()
}

/// Whether `text` is long enough to be worth a chunked alternative
fn is_chunkable(text: &str) -> bool {
    text.chars().count() > 10 && text.split(' ').count() > 3
}

/// Generate up to `MAX_ALTERNATIVES` translations of `text`
///
/// The primary translation must succeed; a failed chunked pass is dropped.
pub async fn generate_alternatives(
    service: &TranslationService,
    text: &str,
    source_language: &str,
    target_language: &str,
) -> Result<Vec<Alternative>, ProviderError> {
    let primary = service.translate(text, source_language, target_language).await?;
    let mut alternatives = vec![Alternative {
        text: primary,
        confidence: 95,
        method: AlternativeMethod::Primary,
    }];

    if is_chunkable(text) {
        let chunks = chunk_text(text);
        let calls = chunks
            .iter()
            .map(|chunk| service.translate(chunk, source_language, target_language));

        match try_join_all(calls).await {
            Ok(parts) => alternatives.push(Alternative {
                text: parts.join(" "),
                confidence: 85,
                method: AlternativeMethod::Chunked,
            }),
            Err(e) => log::warn!("Chunked alternative failed: {}", e),
        }
    }

    alternatives.truncate(MAX_ALTERNATIVES);
    Ok(alternatives)
}
