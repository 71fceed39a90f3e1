/*!
 * Translation memory and glossary.
 *
 * The memory remembers source to target pairs with how often and how
 * recently they were produced. The glossary holds user-forced term
 * substitutions applied after translation. Both lists are written to the
 * key-value store after every mutation and loaded on construction.
 */

use chrono::{DateTime, Utc};
use log::{debug, warn};
use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::database::KeyValueStore;
use crate::errors::StorageError;

/// Storage key of the memory list
pub const MEMORY_KEY: &str = "translationMemory";

/// Storage key of the glossary list
pub const GLOSSARY_KEY: &str = "glossary";

/// Default cap on memory entries
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// A remembered translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    pub source: String,
    pub target: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Times this pair was recorded, at least 1
    pub frequency: u32,
    pub last_used: DateTime<Utc>,
}

impl MemoryEntry {
    fn matches_key(&self, source_lower: &str, source_lang: &str, target_lang: &str) -> bool {
        self.source_lang == source_lang
            && self.target_lang == target_lang
            && self.source.to_lowercase() == source_lower
    }
}

/// A forced term substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryEntry {
    pub term: String,
    pub translation: String,
    pub source_lang: String,
    pub target_lang: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted translation memory plus glossary
#[derive(Debug)]
pub struct TranslationMemory {
    /// Most recently inserted first
    memory: Vec<MemoryEntry>,
    /// Newest first
    glossary: Vec<GlossaryEntry>,
    store: KeyValueStore,
    max_entries: usize,
}

impl TranslationMemory {
    /// Load both lists from `store`, defaulting to empty
    pub fn load(store: KeyValueStore, max_entries: usize) -> Self {
        let mut memory: Vec<MemoryEntry> = store.load_or_default(MEMORY_KEY);
        let glossary: Vec<GlossaryEntry> = store.load_or_default(GLOSSARY_KEY);
        memory.truncate(max_entries);

        debug!(
            "Loaded translation memory ({} entries) and glossary ({} terms)",
            memory.len(),
            glossary.len()
        );

        Self {
            memory,
            glossary,
            store,
            max_entries,
        }
    }

    /// Record a translation, bumping frequency when the pair is known
    ///
    /// A known pair keeps its position; only its frequency and recency
    /// change. A new pair goes to the front and the tail is truncated.
    pub fn add_to_memory(
        &mut self,
        source: &str,
        target: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<(), StorageError> {
        let source_lower = source.to_lowercase();
        let now = Utc::now();

        match self
            .memory
            .iter_mut()
            .find(|m| m.matches_key(&source_lower, source_lang, target_lang))
        {
            Some(existing) => {
                existing.frequency += 1;
                existing.last_used = now;
            }
            None => {
                self.memory.insert(
                    0,
                    MemoryEntry {
                        source: source.to_string(),
                        target: target.to_string(),
                        source_lang: source_lang.to_string(),
                        target_lang: target_lang.to_string(),
                        frequency: 1,
                        last_used: now,
                    },
                );
                self.memory.truncate(self.max_entries);
            }
        }

        self.save()
    }

    /// Entries of the language pair whose source contains `query`,
    /// case-insensitively, most frequent first
    pub fn search_memory(&self, query: &str, source_lang: &str, target_lang: &str) -> Vec<MemoryEntry> {
        let query = query.to_lowercase();
        let mut hits: Vec<MemoryEntry> = self
            .memory
            .iter()
            .filter(|m| {
                m.source_lang == source_lang
                    && m.target_lang == target_lang
                    && m.source.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        hits
    }

    /// Exact, case-insensitive hit for a source text
    pub fn lookup(&self, source: &str, source_lang: &str, target_lang: &str) -> Option<&MemoryEntry> {
        let source_lower = source.to_lowercase();
        self.memory
            .iter()
            .find(|m| m.matches_key(&source_lower, source_lang, target_lang))
    }

    /// Up to `limit` entries, most recently inserted first
    pub fn recent(&self, limit: usize) -> &[MemoryEntry] {
        &self.memory[..limit.min(self.memory.len())]
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.memory
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Add a glossary term; duplicates are allowed
    pub fn add_to_glossary(
        &mut self,
        term: &str,
        translation: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<(), StorageError> {
        self.glossary.insert(
            0,
            GlossaryEntry {
                term: term.to_string(),
                translation: translation.to_string(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
                created_at: Utc::now(),
            },
        );
        self.save()
    }

    /// Remove the glossary entry at `index`
    pub fn remove_glossary(&mut self, index: usize) -> Result<Option<GlossaryEntry>, StorageError> {
        if index >= self.glossary.len() {
            return Ok(None);
        }
        let removed = self.glossary.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    pub fn glossary(&self) -> &[GlossaryEntry] {
        &self.glossary
    }

    /// Replace whole-word, case-insensitive glossary terms in `text`
    ///
    /// Entries apply newest first, each pass on the output of the previous
    /// one, so an older entry can rewrite what a newer one produced.
    pub fn apply_glossary(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        let mut result = text.to_string();

        for entry in self
            .glossary
            .iter()
            .filter(|g| g.source_lang == source_lang && g.target_lang == target_lang)
        {
            if entry.term.is_empty() {
                continue;
            }

            let pattern = format!(r"\b{}\b", regex::escape(&entry.term));
            let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(regex) => regex,
                Err(e) => {
                    warn!("Skipping glossary term '{}': {}", entry.term, e);
                    continue;
                }
            };

            result = regex
                .replace_all(&result, NoExpand(&entry.translation))
                .into_owned();
        }

        result
    }

    /// Write both lists to the store in one transaction
    fn save(&self) -> Result<(), StorageError> {
        let memory = serde_json::to_string(&self.memory)?;
        let glossary = serde_json::to_string(&self.glossary)?;
        self.store
            .set_many(&[(MEMORY_KEY, memory), (GLOSSARY_KEY, glossary)])
    }
}
