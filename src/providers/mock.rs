/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::failing_on(..)` - Fails only for a given input
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslateRequest, TranslateResponse};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails for requests whose text equals the given input
    FailOn(String),
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an undecodable body
    Malformed,
    /// Simulates slow response (for ordering and timeout tests)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared across clones
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<TranslateRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslateRequest) -> String>,
    /// Language reported for auto-detect requests
    detected_language: String,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
            detected_language: "en".to_string(),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that fails only when asked to translate `text`
    pub fn failing_on(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailOn(text.into()))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose responses cannot be decoded
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that waits before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslateRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Set the language reported for `auto` requests
    pub fn with_detected_language(mut self, code: impl Into<String>) -> Self {
        self.detected_language = code.into();
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of received requests
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &TranslateRequest) -> TranslateResponse {
        let text = match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.target_language, request.text),
        };
        let detected_language = if request.source_language == "auto" {
            Some(self.detected_language.clone())
        } else {
            Some(request.source_language.clone())
        };
        TranslateResponse {
            text,
            detected_language,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match &self.behavior {
            MockBehavior::Working => Ok(self.respond(&request)),

            MockBehavior::FailOn(text) if *text == request.text => {
                Err(ProviderError::network(format!("Simulated failure for '{}'", text)))
            }
            MockBehavior::FailOn(_) => Ok(self.respond(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::http_status(
                        503,
                        format!("Simulated intermittent failure (request #{})", count + 1),
                    ))
                } else {
                    Ok(self.respond(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::http_status(
                500,
                "Simulated provider failure",
            )),

            MockBehavior::Malformed => Err(ProviderError::ParseError(
                "Expected an array of segments".to_string(),
            )),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(self.respond(&request))
            }
        }
    }
}
