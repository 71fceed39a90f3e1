/*!
 * Tests for the HTTP translation client against a local canned server
 */

use std::sync::Arc;
use std::time::Duration;
use tolk::errors::ProviderError;
use tolk::providers::gtx::GoogleTranslate;
use tolk::providers::{Provider, TranslateRequest};
use tolk::translation::TranslationService;

use crate::common::CannedServer;

#[tokio::test]
async fn test_complete_withSuccessBody_shouldConcatenateSegments() {
    let server = CannedServer::start(
        200,
        r#"[[["Bonjour ","Hello ",null,null,10],["le monde","world",null,null,10]],null,"en",null,null,null,1]"#,
    )
    .await;
    let client = GoogleTranslate::new(server.url.clone(), Duration::from_secs(5));

    let response = client
        .complete(TranslateRequest::new("Hello world", "auto", "fr"))
        .await
        .unwrap();

    assert_eq!(response.text, "Bonjour le monde");
    assert_eq!(response.detected_language.as_deref(), Some("en"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /translate_a/single?client=gtx&sl=auto&tl=fr&dt=t&q=Hello"));
}

#[tokio::test]
async fn test_complete_withServerError_shouldReturnNetworkError() {
    let server = CannedServer::start(500, "upstream exploded").await;
    let client = GoogleTranslate::new(server.url.clone(), Duration::from_secs(5));

    let err = client
        .complete(TranslateRequest::new("Hello", "en", "fr"))
        .await
        .unwrap_err();

    match err {
        ProviderError::NetworkError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, Some(500));
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected NetworkError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_withMalformedBody_shouldReturnParseError() {
    let server = CannedServer::start(200, r#"{"error":"nope"}"#).await;
    let client = GoogleTranslate::new(server.url.clone(), Duration::from_secs(5));

    let err = client
        .complete(TranslateRequest::new("Hello", "en", "fr"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ParseError(_)));
}

#[tokio::test]
async fn test_complete_withUnreachableHost_shouldReturnNetworkError() {
    let client = GoogleTranslate::new("http://127.0.0.1:9/translate_a/single", Duration::from_secs(2));

    let err = client
        .complete(TranslateRequest::new("Hello", "en", "fr"))
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_service_detectLanguage_shouldUseThirdElement() {
    let server = CannedServer::start(200, r#"[[["Hello","Hallo"]],null,"de"]"#).await;
    let service = TranslationService::new(Arc::new(GoogleTranslate::new(
        server.url.clone(),
        Duration::from_secs(5),
    )));

    let detection = service.detect_language("Hallo").await.unwrap();

    assert_eq!(detection.language, "de");
    assert_eq!(detection.language_name, "German");
}
