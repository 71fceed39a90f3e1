/*!
 * Tests for the batch queue processor
 */

use std::sync::Arc;
use std::time::{Duration, Instant};
use tolk::errors::TranslationError;
use tolk::providers::mock::MockProvider;
use tolk::translation::batch::export_items;
use tolk::translation::{BatchStatus, BatchTranslator, ExportFormat, TranslationService};

fn translator(mock: &MockProvider, delay: Duration) -> BatchTranslator {
    let service = Arc::new(TranslationService::new(Arc::new(mock.clone())));
    BatchTranslator::new(service, delay)
}

#[tokio::test]
async fn test_run_withOneFailingItem_shouldIsolateFailure() {
    let mock = MockProvider::failing_on("b");
    let mut batch = translator(&mock, Duration::ZERO);
    batch.enqueue(["a", "b", "c"], "en", "es");

    let mut progress = Vec::new();
    let items = batch.run(|done, total| progress.push((done, total))).await.unwrap();

    let statuses: Vec<BatchStatus> = items.iter().map(|item| item.status).collect();
    assert_eq!(
        statuses,
        vec![BatchStatus::Completed, BatchStatus::Failed, BatchStatus::Completed]
    );
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(items[0].result.as_deref(), Some("[es] a"));
    assert!(items[1].result.is_none());
    assert!(items[1].error.as_deref().unwrap().contains("Simulated failure"));
}

#[tokio::test]
async fn test_run_shouldCallEndpointInQueueOrder() {
    let mock = MockProvider::working();
    let mut batch = translator(&mock, Duration::ZERO);
    batch.enqueue(vec!["first".to_string(), "second".to_string(), "third".to_string()], "en", "de");

    batch.run(|_, _| {}).await.unwrap();

    let sent: Vec<String> = mock.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(sent, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_run_shouldPauseAfterEveryItem() {
    let mock = MockProvider::working();
    let mut batch = translator(&mock, Duration::from_millis(20));
    batch.enqueue(["one", "two", "three"], "en", "fr");

    let start = Instant::now();
    batch.run(|_, _| {}).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_run_withEmptyQueue_shouldFail() {
    let mock = MockProvider::working();
    let mut batch = translator(&mock, Duration::ZERO);

    let err = batch.run(|_, _| {}).await.unwrap_err();

    assert!(matches!(err, TranslationError::BatchEmpty));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_enqueue_shouldReplacePreviousQueue() {
    let mock = MockProvider::working();
    let mut batch = translator(&mock, Duration::ZERO);
    batch.enqueue(["old"], "en", "es");
    batch.enqueue(["new one", "new two"], "en", "it");

    assert_eq!(batch.items().len(), 2);
    assert!(batch.items().iter().all(|item| item.status == BatchStatus::Pending));
    assert_eq!(batch.items()[0].target_lang, "it");
}

#[tokio::test]
async fn test_exportResults_afterRun_shouldRenderEveryFormat() {
    let mock = MockProvider::failing_on("b");
    let mut batch = translator(&mock, Duration::ZERO);
    batch.enqueue(["a", "b"], "en", "es");
    let items = batch.run(|_, _| {}).await.unwrap();

    assert_eq!(batch.export_results(ExportFormat::Tsv), "a\t[es] a\nb\tFailed");
    assert_eq!(
        batch.export_results(ExportFormat::TsvWithStatus),
        "Original\tTranslation\tStatus\na\t[es] a\tcompleted\nb\tFailed\tfailed"
    );
    assert_eq!(
        batch.export_results(ExportFormat::Csv),
        "Original,Translation,Status\n\"a\",\"[es] a\",\"completed\"\n\"b\",\"Failed\",\"failed\""
    );

    let json: serde_json::Value =
        serde_json::from_str(&export_items(&items, ExportFormat::Json)).unwrap();
    assert_eq!(json[1]["translation"], "Failed");
    assert_eq!(json[1]["status"], "failed");
    assert_eq!(json[0]["original"], "a");
}

#[test]
fn test_run_onBlockingRuntime_shouldCompleteAllItems() {
    let mock = MockProvider::working();
    let mut batch = translator(&mock, Duration::ZERO);
    batch.enqueue(["x", "y"], "en", "pt");

    let items = tokio_test::block_on(batch.run(|_, _| {})).unwrap();

    assert!(items.iter().all(|item| item.status == BatchStatus::Completed));
}
