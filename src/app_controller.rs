use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::{DatabaseConnection, KeyValueStore};
use crate::errors::TranslationError;
use crate::file_utils::FileManager;
use crate::language_utils::{self, AUTO_DETECT};
use crate::providers::Provider;
use crate::session::{HistoryEntry, HistoryQuery, Preferences, SessionManager};
use crate::translation::{
    Alternative, BatchItem, BatchTranslator, Detection, QualityScore, RateLimiter,
    RequestSequencer, TranslationMemory, TranslationService, generate_alternatives,
    generate_pronunciation,
};

// @module: Application controller wiring translation, memory and session state

/// Everything produced by one interactive translation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutcome {
    /// Input as sent, after trimming and truncation
    pub input: String,
    pub output: String,
    pub source_lang: String,
    pub target_lang: String,
    pub quality: QualityScore,
    pub pronunciation: String,
    /// Present only when the source language was `auto`
    pub detection: Option<Detection>,
    /// Served from translation memory instead of the endpoint
    pub from_memory: bool,
    /// Input exceeded the character limit and was cut
    pub truncated: bool,
}

impl TranslationOutcome {
    /// History record for this outcome
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(&self.input, &self.output, &self.source_lang, &self.target_lang)
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    service: Arc<TranslationService>,
    rate_limiter: RateLimiter,
    memory: Mutex<TranslationMemory>,
    session: Mutex<SessionManager>,
    sequencer: RequestSequencer,
}

impl Controller {
    // @method: Create a controller talking to the configured endpoint and storage
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match &config.storage_path {
            Some(path) => DatabaseConnection::new(path),
            None => DatabaseConnection::new_default(),
        }
        .context("Failed to open local storage")?;

        info!("Using storage at {}", db.path().display());
        let service = TranslationService::from_config(&config.endpoint);
        Ok(Self::from_parts(config, service, KeyValueStore::new(db)))
    }

    /// Create a controller over any provider and store
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>, store: KeyValueStore) -> Self {
        Self::from_parts(config, TranslationService::new(provider), store)
    }

    /// Create a controller for test purposes over an in-memory store
    pub fn new_for_test(provider: Arc<dyn Provider>) -> Result<Self> {
        let store = KeyValueStore::in_memory()?;
        Ok(Self::with_provider(Config::default(), provider, store))
    }

    fn from_parts(config: Config, service: TranslationService, store: KeyValueStore) -> Self {
        let memory = TranslationMemory::load(store.clone(), config.memory.max_entries);
        let rate_limiter = RateLimiter::from_config_with_store(&config.rate_limit, store.clone());
        let defaults = Preferences {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            dark_mode: false,
        };
        let session = SessionManager::load(
            store,
            config.history_limit,
            config.recent_languages_limit,
            defaults,
        );

        Self {
            rate_limiter,
            service: Arc::new(service),
            memory: Mutex::new(memory),
            session: Mutex::new(session),
            sequencer: RequestSequencer::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<TranslationService> {
        Arc::clone(&self.service)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Run `f` with the translation memory locked
    pub fn with_memory<T>(&self, f: impl FnOnce(&mut TranslationMemory) -> T) -> T {
        f(&mut self.memory.lock())
    }

    /// Run `f` with the session state locked
    pub fn with_session<T>(&self, f: impl FnOnce(&mut SessionManager) -> T) -> T {
        f(&mut self.session.lock())
    }

    // =========================================================================
    // Interactive translation
    // =========================================================================

    /// Translate `text` between the given languages
    ///
    /// Returns `Ok(None)` when the trimmed input is empty or when a newer
    /// request was started while this one was in flight.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<TranslationOutcome>, TranslationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let (input, truncated) = truncate_chars(trimmed, self.config.max_input_chars);
        if truncated {
            warn!(
                "Input truncated to {} characters",
                self.config.max_input_chars
            );
        }

        if !self.rate_limiter.allow() {
            warn!("Rate limit reached, request not sent");
            return Err(TranslationError::RateLimitExceeded {
                max_requests: self.rate_limiter.max_requests(),
                window_secs: self.rate_limiter.window().as_secs(),
            });
        }

        let sequence = self.sequencer.next();

        let remembered = if self.config.memory.reuse_translations {
            self.memory
                .lock()
                .lookup(&input, source_lang, target_lang)
                .map(|entry| entry.target.clone())
        } else {
            None
        };

        let from_memory = remembered.is_some();
        let raw_output = match remembered {
            Some(target) => {
                debug!("Translation memory hit for request #{}", sequence);
                target
            }
            None => match self.service.translate(&input, source_lang, target_lang).await {
                Ok(output) => output,
                Err(e) => {
                    error!("Translation failed: {}", e);
                    return Err(e.into());
                }
            },
        };

        if !self.sequencer.is_latest(sequence) {
            warn!("Discarding superseded response for request #{}", sequence);
            return Ok(None);
        }

        let output = if self.config.memory.apply_glossary {
            self.memory
                .lock()
                .apply_glossary(&raw_output, source_lang, target_lang)
        } else {
            raw_output
        };

        self.memory
            .lock()
            .add_to_memory(&input, &output, source_lang, target_lang)?;

        {
            let mut session = self.session.lock();
            session.add_history(HistoryEntry::new(&input, &output, source_lang, target_lang))?;
            session.touch_language(target_lang, &language_utils::display_name(target_lang))?;
        }

        let detection = if source_lang == AUTO_DETECT {
            Some(self.service.detect_language_or_unknown(&input).await)
        } else {
            None
        };

        Ok(Some(TranslationOutcome {
            quality: QualityScore::of(&input, &output),
            pronunciation: generate_pronunciation(&output, target_lang),
            input,
            output,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            detection,
            from_memory,
            truncated,
        }))
    }

    /// Translate with the persisted language selection
    pub async fn translate_with_preferences(
        &self,
        text: &str,
    ) -> Result<Option<TranslationOutcome>, TranslationError> {
        let Preferences {
            source_language,
            target_language,
            ..
        } = self.session.lock().preferences().clone();
        self.translate(text, &source_language, &target_language).await
    }

    /// Translate the contents of a plain-text file
    pub async fn translate_file<P: AsRef<Path>>(
        &self,
        path: P,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<TranslationOutcome>, TranslationError> {
        let content = FileManager::read_text_input(path)?;
        self.translate(&content, source_lang, target_lang).await
    }

    /// Detect the language of `text`
    pub async fn detect(&self, text: &str) -> Detection {
        self.service.detect_language_or_unknown(text.trim()).await
    }

    /// Primary and chunked alternatives for `text`
    pub async fn alternatives(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<Alternative>, TranslationError> {
        Ok(generate_alternatives(&self.service, text.trim(), source_lang, target_lang).await?)
    }

    // =========================================================================
    // Batch
    // =========================================================================

    /// Translate `texts` one by one with the configured pacing
    ///
    /// A progress bar is drawn when `show_progress` is set.
    pub async fn run_batch(
        &self,
        texts: Vec<String>,
        source_lang: &str,
        target_lang: &str,
        show_progress: bool,
    ) -> Result<Vec<BatchItem>, TranslationError> {
        let mut batch = BatchTranslator::new(self.service(), self.config.batch.delay());
        batch.enqueue(texts, source_lang, target_lang);

        let progress_bar = if show_progress {
            let bar = ProgressBar::new(batch.items().len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} items ({percent}%) {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%)"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style.progress_chars("█▓▒░"));
            Some(bar)
        } else {
            None
        };

        let result = batch
            .run(|processed, total| {
                if let Some(bar) = &progress_bar {
                    bar.set_position(processed as u64);
                    bar.set_message(format!("{}/{}", processed, total));
                }
            })
            .await;

        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }
        result
    }

    // =========================================================================
    // Session passthroughs
    // =========================================================================

    pub fn history(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        self.session.lock().search_history(query)
    }

    /// Toggle the most recent history entry as a favorite
    pub fn toggle_latest_favorite(&self) -> Result<Option<bool>, TranslationError> {
        let mut session = self.session.lock();
        let latest = match session.history().first() {
            Some(entry) => entry.clone(),
            None => return Ok(None),
        };
        Ok(Some(session.toggle_favorite(&latest)?))
    }
}

/// Cut `text` to at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}
