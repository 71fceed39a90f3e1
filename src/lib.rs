/*!
 * # Tolk - a command-line translator
 *
 * A Rust library for translating text through the public Google Translate
 * endpoint, with a local translation memory and session state.
 *
 * ## Features
 *
 * - Single translations with quality scoring and pronunciation guides
 * - Language detection with a script-based confidence heuristic
 * - Fixed-window rate limiting of outbound requests
 * - Translation memory and glossary persisted in SQLite
 * - Paced batch translation with JSON, CSV and TSV export
 * - History, favorites, recent languages and preferences
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Translation engine:
 *   - `translation::core`: Translation client and request sequencing
 *   - `translation::rate_limit`: Request quota
 *   - `translation::memory`: Translation memory and glossary
 *   - `translation::batch`: Batch processing and export
 * - `providers`: Endpoint clients (`gtx`) and a test double (`mock`)
 * - `database`: SQLite key-value storage
 * - `session`: History, favorites and preferences
 * - `file_utils`: File input and atomic export writes
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslationOutcome};
pub use errors::{AppError, ProviderError, StorageError, TranslationError};
pub use language_utils::get_language_name;
pub use translation::TranslationService;
