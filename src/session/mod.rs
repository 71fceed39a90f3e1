/*!
 * Session state kept between runs.
 *
 * This module provides:
 * - Translation history with search, language filter and ordering
 * - Favorites keyed by input/output pair
 * - Recently used target languages
 * - Persisted language selection and dark mode
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::SessionManager;
pub use models::{Favorite, HistoryEntry, HistoryOrder, HistoryQuery, Preferences, RecentLanguage};
