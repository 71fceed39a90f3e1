/*!
 * Core translation functionality.
 *
 * `TranslationService` wraps one provider call per operation. It neither
 * retries nor caches; reuse of earlier results is the translation memory's
 * job and quota enforcement is the rate limiter's.
 */

use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::detection::Detection;
use crate::app_config::EndpointConfig;
use crate::errors::ProviderError;
use crate::language_utils::AUTO_DETECT;
use crate::providers::gtx::GoogleTranslate;
use crate::providers::{Provider, TranslateRequest};

/// Target language used when only detection is wanted
const DETECTION_TARGET: &str = "en";

/// Translation client over a provider
#[derive(Debug, Clone)]
pub struct TranslationService {
    provider: Arc<dyn Provider>,
}

impl TranslationService {
    /// Create a service over any provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Service talking to the configured public endpoint
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self::new(Arc::new(GoogleTranslate::from_config(config)))
    }

    /// Translate `text`, returning the concatenated fragments
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .provider
            .complete(TranslateRequest::new(text, source_language, target_language))
            .await?;
        Ok(response.text)
    }

    /// Ask the endpoint which language `text` is in
    pub async fn detect_language(&self, text: &str) -> Result<Detection, ProviderError> {
        let response = self
            .provider
            .complete(TranslateRequest::new(text, AUTO_DETECT, DETECTION_TARGET))
            .await?;

        let language = response.detected_language.ok_or_else(|| {
            ProviderError::ParseError("Response carries no detected language".to_string())
        })?;

        let detection = Detection::new(language, text);
        debug!(
            "Detected {} ({}) with confidence {}",
            detection.language, detection.language_name, detection.confidence
        );
        Ok(detection)
    }

    /// Detection that degrades to `Detection::unknown()` on any failure
    pub async fn detect_language_or_unknown(&self, text: &str) -> Detection {
        match self.detect_language(text).await {
            Ok(detection) => detection,
            Err(e) => {
                warn!("Language detection failed: {}", e);
                Detection::unknown()
            }
        }
    }
}

/// Issues monotonically increasing request tags
///
/// A completion is current only if no request was started after it, so
/// the last request started wins regardless of completion order.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new request
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `sequence` is still the most recent request
    pub fn is_latest(&self, sequence: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == sequence
    }
}
