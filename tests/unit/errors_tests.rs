/*!
 * Tests for error types and conversions
 */

use tolk::errors::{AppError, ProviderError, StorageError, TranslationError};

#[test]
fn test_providerError_isNetwork_shouldCoverWireFailuresOnly() {
    assert!(ProviderError::network("timeout").is_network());
    assert!(ProviderError::http_status(429, "Too Many Requests").is_network());
    assert!(!ProviderError::ParseError("bad".to_string()).is_network());
}

#[test]
fn test_providerError_display_shouldIncludeStatus() {
    let err = ProviderError::http_status(500, "boom");
    assert_eq!(err.to_string(), "Network error: HTTP 500 - boom");
    assert_eq!(err.status_code(), Some(500));

    let err = ProviderError::network("connection reset");
    assert_eq!(err.to_string(), "Network error: connection reset");
    assert_eq!(err.status_code(), None);
}

#[test]
fn test_translationError_fromProviderError_shouldWrap() {
    let err: TranslationError = ProviderError::ParseError("shape".to_string()).into();
    assert!(matches!(err, TranslationError::Provider(ProviderError::ParseError(_))));
}

#[test]
fn test_rateLimitExceeded_display_shouldNameQuota() {
    let err = TranslationError::RateLimitExceeded {
        max_requests: 30,
        window_secs: 60,
    };
    assert_eq!(
        err.to_string(),
        "Rate limit exceeded: at most 30 requests per 60s"
    );
}

#[test]
fn test_storageError_fromSerdeError_shouldConvert() {
    let serde_err = serde_json::from_str::<Vec<String>>("nope").unwrap_err();
    let err: StorageError = serde_err.into();
    assert!(matches!(err, StorageError::Serialization(_)));

    let translation_err: TranslationError = err.into();
    assert!(matches!(translation_err, TranslationError::Storage(_)));
}

#[test]
fn test_appError_conversions_shouldPickVariant() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io), AppError::File(_)));

    let any = anyhow::anyhow!("something");
    assert!(matches!(AppError::from(any), AppError::Unknown(_)));

    let app: AppError = TranslationError::BatchEmpty.into();
    assert_eq!(app.to_string(), "Translation error: Batch queue is empty");
}
