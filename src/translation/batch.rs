/*!
 * Batch translation processing.
 *
 * Items are translated strictly one after another with a fixed pause after
 * each, so a batch never bursts past the endpoint's abuse thresholds. A
 * failed item is recorded and the run moves on.
 */

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::core::TranslationService;
use crate::errors::TranslationError;

/// Text written in exports for items without a result
const FAILED_PLACEHOLDER: &str = "Failed";

/// Lifecycle of a batch item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One queued translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub status: BatchStatus,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl BatchItem {
    fn pending(text: String, source_lang: &str, target_lang: &str) -> Self {
        Self {
            text,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            status: BatchStatus::Pending,
            result: None,
            error: None,
        }
    }
}

/// Export layout for batch results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Json,
    Csv,
    /// Tab-separated original/translation pairs
    #[default]
    Tsv,
    /// Tab-separated rows under an `Original/Translation/Status` header,
    /// for spreadsheet import
    TsvWithStatus,
}

impl ExportFormat {
    /// File extension matching the written content
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv | Self::TsvWithStatus => "tsv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to TSV; "xlsx" names the spreadsheet layout,
    /// which is tab-separated text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "xlsx" => Self::TsvWithStatus,
            _ => Self::Tsv,
        })
    }
}

/// Row shape shared by all export formats
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    original: &'a str,
    translation: &'a str,
    status: BatchStatus,
}

/// Sequential, paced batch translator
pub struct BatchTranslator {
    /// The translation service to use
    service: Arc<TranslationService>,
    /// Pause after every item
    delay: Duration,
    queue: Vec<BatchItem>,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: Arc<TranslationService>, delay: Duration) -> Self {
        Self {
            service,
            delay,
            queue: Vec::new(),
        }
    }

    /// Replace the queue with one pending item per text
    pub fn enqueue<I, S>(&mut self, texts: I, source_lang: &str, target_lang: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue = texts
            .into_iter()
            .map(|text| BatchItem::pending(text.into(), source_lang, target_lang))
            .collect();
    }

    /// Current queue, in original order
    pub fn items(&self) -> &[BatchItem] {
        &self.queue
    }

    /// Translate every queued item in order
    ///
    /// `on_progress(processed, total)` fires after each item, success or
    /// failure, before the pacing delay. Taking `&mut self` rules out a
    /// second run on the same queue while one is in flight.
    pub async fn run<F>(&mut self, mut on_progress: F) -> Result<Vec<BatchItem>, TranslationError>
    where
        F: FnMut(usize, usize),
    {
        if self.queue.is_empty() {
            return Err(TranslationError::BatchEmpty);
        }

        let total = self.queue.len();
        let start_time = Instant::now();
        info!("Starting batch of {} item(s)", total);

        for idx in 0..total {
            let (text, source_lang, target_lang) = {
                let item = &self.queue[idx];
                (item.text.clone(), item.source_lang.clone(), item.target_lang.clone())
            };

            let outcome = self.service.translate(&text, &source_lang, &target_lang).await;

            let item = &mut self.queue[idx];
            match outcome {
                Ok(translation) => {
                    item.status = BatchStatus::Completed;
                    item.result = Some(translation);
                }
                Err(e) => {
                    error!("Batch item {} of {} failed: {}", idx + 1, total, e);
                    item.status = BatchStatus::Failed;
                    item.error = Some(e.to_string());
                }
            }

            on_progress(idx + 1, total);
            tokio::time::sleep(self.delay).await;
        }

        let failed = self
            .queue
            .iter()
            .filter(|item| item.status == BatchStatus::Failed)
            .count();
        info!(
            "Batch finished in {:?}: {} completed, {} failed",
            start_time.elapsed(),
            total - failed,
            failed
        );

        Ok(self.queue.clone())
    }

    /// Render the processed queue in `format`
    pub fn export_results(&self, format: ExportFormat) -> String {
        export_items(&self.queue, format)
    }
}

/// Render items in the requested export layout
pub fn export_items(items: &[BatchItem], format: ExportFormat) -> String {
    let rows: Vec<ExportRow<'_>> = items
        .iter()
        .map(|item| ExportRow {
            original: &item.text,
            translation: item.result.as_deref().unwrap_or(FAILED_PLACEHOLDER),
            status: item.status,
        })
        .collect();

    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
        }
        ExportFormat::Csv => {
            let mut out = String::from("Original,Translation,Status\n");
            let body = rows
                .iter()
                .map(|row| {
                    format!(
                        "{},{},{}",
                        csv_quote(row.original),
                        csv_quote(row.translation),
                        csv_quote(&row.status.to_string())
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            out.push_str(&body);
            out
        }
        ExportFormat::Tsv => rows
            .iter()
            .map(|row| format!("{}\t{}", row.original, row.translation))
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::TsvWithStatus => {
            let mut out = String::from("Original\tTranslation\tStatus\n");
            let body = rows
                .iter()
                .map(|row| format!("{}\t{}\t{}", row.original, row.translation, row.status))
                .collect::<Vec<_>>()
                .join("\n");
            out.push_str(&body);
            out
        }
    }
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
