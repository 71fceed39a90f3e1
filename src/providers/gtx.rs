use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{Provider, TranslateRequest, TranslateResponse};
use crate::app_config::EndpointConfig;
use crate::errors::ProviderError;

/// Client for the public `translate_a/single` endpoint
///
/// The endpoint answers a GET with a JSON array:
/// `[[["Hola", "Hello", ...], ...], null, "en", ...]`. The first element
/// holds the segments, each starting with a translated fragment; the third
/// element is the detected source language.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL without query string
    endpoint: String,
    /// Value of the `client` query parameter
    client_id: String,
}

impl GoogleTranslate {
    /// Create a new client against `endpoint`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            client_id: "gtx".to_string(),
        }
    }

    /// Create a client from the endpoint section of the configuration
    pub fn from_config(config: &EndpointConfig) -> Self {
        let mut client = Self::new(config.url.clone(), config.timeout());
        client.client_id = config.client_id.clone();
        client
    }

    /// Build the full request URL with encoded query parameters
    pub fn request_url(&self, request: &TranslateRequest) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", self.client_id.as_str()),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ],
        )
        .map_err(|e| ProviderError::network(format!("Invalid endpoint URL '{}': {}", self.endpoint, e)))
    }
}

/// Decode the nested-array body into a normalized response
pub fn parse_response(body: &str) -> Result<TranslateResponse, ProviderError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Response is not JSON: {}", e)))?;
    parse_value(&value)
}

/// Decode an already-parsed body
pub fn parse_value(value: &Value) -> Result<TranslateResponse, ProviderError> {
    let top = value
        .as_array()
        .ok_or_else(|| ProviderError::ParseError("Expected a top-level array".to_string()))?;

    let segments = top
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("Expected an array of segments".to_string()))?;

    let mut text = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        let parts = segment.as_array().ok_or_else(|| {
            ProviderError::ParseError(format!("Segment {} is not an array", idx))
        })?;
        match parts.first() {
            Some(Value::String(fragment)) => text.push_str(fragment),
            // transliteration-only segments carry a null fragment
            Some(Value::Null) | None => {}
            Some(other) => {
                return Err(ProviderError::ParseError(format!(
                    "Segment {} has a non-text fragment: {}",
                    idx, other
                )));
            }
        }
    }

    let detected_language = top
        .get(2)
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(TranslateResponse {
        text,
        detected_language,
    })
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn complete(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        let url = self.request_url(&request)?;
        debug!(
            "Requesting translation {} -> {} ({} chars)",
            request.source_language,
            request.target_language,
            request.text.chars().count()
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation endpoint error ({}): {}", status, message);
            return Err(ProviderError::http_status(status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("Failed to read response body: {}", e)))?;

        parse_response(&body)
    }
}
