/*!
 * Provider implementations for the translation endpoint.
 *
 * - `gtx`: the public translate-and-detect HTTP endpoint
 * - `mock`: scripted provider for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One call to the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or "auto" to request detection
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Normalized endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslateResponse {
    /// Concatenated translated fragments
    pub text: String,
    /// Source language reported by the endpoint, if any
    pub detected_language: Option<String>,
}

/// Common trait for translation backends
///
/// Lets the translation service, the batch queue and the alternatives
/// generator run against the real endpoint or a mock interchangeably.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Perform exactly one request; no retry, no caching
    async fn complete(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError>;
}

pub mod gtx;
pub mod mock;
