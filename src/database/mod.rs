/*!
 * Database module for persistent application state.
 *
 * This module provides SQLite-based persistence for the translation memory,
 * the glossary and the session state (history, favorites, recent languages,
 * preferences). Values are stored as JSON under string keys, so the store
 * behaves like a durable key-value map.
 */

pub mod schema;
pub mod connection;
pub mod repository;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::KeyValueStore;
