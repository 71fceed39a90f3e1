/*!
 * Session manager for persisted user state.
 *
 * This module handles:
 * - Translation history with search and filtering
 * - Favorites toggled by input/output pair
 * - Recently used target languages
 * - Language and display preferences
 *
 * Every mutation is written through to the key-value store before the
 * method returns.
 */

use log::{debug, info};

use crate::database::KeyValueStore;
use crate::errors::StorageError;
use crate::language_utils::AUTO_DETECT;

use super::models::{Favorite, HistoryEntry, HistoryOrder, HistoryQuery, Preferences, RecentLanguage};

pub const HISTORY_KEY: &str = "history";
pub const FAVORITES_KEY: &str = "favorites";
pub const RECENT_LANGUAGES_KEY: &str = "recentLanguages";
pub const INPUT_LANGUAGE_KEY: &str = "input-language";
pub const OUTPUT_LANGUAGE_KEY: &str = "output-language";
pub const DARK_MODE_KEY: &str = "darkMode";

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Session manager for history, favorites, recent languages and preferences
#[derive(Debug)]
pub struct SessionManager {
    store: KeyValueStore,
    history: Vec<HistoryEntry>,
    favorites: Vec<Favorite>,
    recent_languages: Vec<RecentLanguage>,
    preferences: Preferences,
    history_limit: usize,
    recent_limit: usize,
}

impl SessionManager {
    /// Load session state from `store`, falling back to `defaults` for
    /// preferences that were never saved
    pub fn load(
        store: KeyValueStore,
        history_limit: usize,
        recent_limit: usize,
        defaults: Preferences,
    ) -> Self {
        let history: Vec<HistoryEntry> = store.load_or_default(HISTORY_KEY);
        let favorites: Vec<Favorite> = store.load_or_default(FAVORITES_KEY);
        let recent_languages: Vec<RecentLanguage> = store.load_or_default(RECENT_LANGUAGES_KEY);

        let preferences = Preferences {
            source_language: store
                .get(INPUT_LANGUAGE_KEY)
                .ok()
                .flatten()
                .unwrap_or(defaults.source_language),
            target_language: store
                .get(OUTPUT_LANGUAGE_KEY)
                .ok()
                .flatten()
                .unwrap_or(defaults.target_language),
            dark_mode: store.get(DARK_MODE_KEY).ok().flatten().unwrap_or(defaults.dark_mode),
        };

        debug!(
            "Loaded session: {} history, {} favorites, {} recent languages",
            history.len(),
            favorites.len(),
            recent_languages.len()
        );

        Self {
            store,
            history,
            favorites,
            recent_languages,
            preferences,
            history_limit,
            recent_limit,
        }
    }

    /// Session manager with default limits over an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        Ok(Self::load(
            KeyValueStore::in_memory()?,
            DEFAULT_HISTORY_LIMIT,
            DEFAULT_RECENT_LIMIT,
            Preferences::default(),
        ))
    }

    /// Get the underlying store
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Record a translation at the front of history
    pub fn add_history(&mut self, entry: HistoryEntry) -> Result<(), StorageError> {
        self.history.insert(0, entry);
        self.history.truncate(self.history_limit);
        self.store.set(HISTORY_KEY, &self.history)
    }

    /// All history, newest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Filter and order history
    pub fn search_history(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        let mut filtered: Vec<HistoryEntry> = self
            .history
            .iter()
            .filter(|entry| match query.term.as_deref() {
                Some(term) if !term.is_empty() => entry.matches_term(term),
                _ => true,
            })
            .filter(|entry| match query.language.as_deref() {
                Some(code) => entry.involves_language(code),
                None => true,
            })
            .cloned()
            .collect();

        if query.order == HistoryOrder::Oldest {
            filtered.reverse();
        }
        filtered
    }

    /// Delete the history entry at `index` (newest first)
    pub fn delete_history(&mut self, index: usize) -> Result<Option<HistoryEntry>, StorageError> {
        if index >= self.history.len() {
            return Ok(None);
        }
        let removed = self.history.remove(index);
        self.store.set(HISTORY_KEY, &self.history)?;
        Ok(Some(removed))
    }

    /// Drop all history
    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        info!("Clearing {} history entries", self.history.len());
        self.history.clear();
        self.store.set(HISTORY_KEY, &self.history)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Add `entry` to favorites, or remove it if the same pair is already
    /// saved. Returns whether the pair is a favorite afterwards.
    pub fn toggle_favorite(&mut self, entry: &HistoryEntry) -> Result<bool, StorageError> {
        let before = self.favorites.len();
        self.favorites.retain(|favorite| !favorite.same_pair(entry));

        let is_favorite = if self.favorites.len() == before {
            self.favorites.push(entry.clone());
            true
        } else {
            false
        };

        self.store.set(FAVORITES_KEY, &self.favorites)?;
        Ok(is_favorite)
    }

    pub fn is_favorite(&self, entry: &HistoryEntry) -> bool {
        self.favorites.iter().any(|favorite| favorite.same_pair(entry))
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn delete_favorite(&mut self, index: usize) -> Result<Option<Favorite>, StorageError> {
        if index >= self.favorites.len() {
            return Ok(None);
        }
        let removed = self.favorites.remove(index);
        self.store.set(FAVORITES_KEY, &self.favorites)?;
        Ok(Some(removed))
    }

    // =========================================================================
    // Recent languages
    // =========================================================================

    /// Move `code` to the front of the recent list
    pub fn touch_language(&mut self, code: &str, name: &str) -> Result<(), StorageError> {
        self.recent_languages.retain(|language| language.code != code);
        self.recent_languages.insert(
            0,
            RecentLanguage {
                code: code.to_string(),
                name: name.to_string(),
            },
        );
        self.recent_languages.truncate(self.recent_limit);
        self.store.set(RECENT_LANGUAGES_KEY, &self.recent_languages)
    }

    pub fn recent_languages(&self) -> &[RecentLanguage] {
        &self.recent_languages
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Persist the selected language pair
    pub fn set_languages(&mut self, source: &str, target: &str) -> Result<(), StorageError> {
        self.preferences.source_language = source.to_string();
        self.preferences.target_language = target.to_string();
        self.save_languages()
    }

    /// Swap source and target. Auto-detect cannot become a target, so the
    /// swap is refused (returns false) while the source is `auto`.
    pub fn swap_languages(&mut self) -> Result<bool, StorageError> {
        if self.preferences.source_language == AUTO_DETECT {
            return Ok(false);
        }
        std::mem::swap(
            &mut self.preferences.source_language,
            &mut self.preferences.target_language,
        );
        self.save_languages()?;
        Ok(true)
    }

    /// Flip dark mode, returning the new value
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        self.preferences.dark_mode = !self.preferences.dark_mode;
        self.store.set(DARK_MODE_KEY, &self.preferences.dark_mode)?;
        Ok(self.preferences.dark_mode)
    }

    fn save_languages(&self) -> Result<(), StorageError> {
        self.store.set_many(&[
            (
                INPUT_LANGUAGE_KEY,
                serde_json::to_string(&self.preferences.source_language)?,
            ),
            (
                OUTPUT_LANGUAGE_KEY,
                serde_json::to_string(&self.preferences.target_language)?,
            ),
        ])
    }
}
