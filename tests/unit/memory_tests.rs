/*!
 * Tests for the translation memory and glossary through the public API
 */

use tolk::database::{DatabaseConnection, KeyValueStore};
use tolk::translation::memory::{DEFAULT_MAX_ENTRIES, GLOSSARY_KEY, MEMORY_KEY, MemoryEntry};
use tolk::translation::TranslationMemory;

use crate::common;

#[test]
fn test_memory_onDiskDatabase_shouldSurviveReopen() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("state").join("tolk.db");

    {
        let store = KeyValueStore::new(DatabaseConnection::new(&db_path).unwrap());
        let mut tm = TranslationMemory::load(store, DEFAULT_MAX_ENTRIES);
        tm.add_to_memory("Thank you", "Gracias", "en", "es").unwrap();
        tm.add_to_memory("thank you", "Gracias", "en", "es").unwrap();
        tm.add_to_glossary("you", "usted", "en", "es").unwrap();
    }

    let store = KeyValueStore::new(DatabaseConnection::new(&db_path).unwrap());
    let tm = TranslationMemory::load(store, DEFAULT_MAX_ENTRIES);
    assert_eq!(tm.entries()[0].frequency, 2);
    assert_eq!(tm.glossary().len(), 1);
}

#[test]
fn test_memory_shouldPersistUnderWellKnownKeys() {
    let store = KeyValueStore::in_memory().unwrap();
    let mut tm = TranslationMemory::load(store.clone(), DEFAULT_MAX_ENTRIES);
    tm.add_to_memory("Hi", "Salut", "en", "fr").unwrap();

    let keys = store.keys().unwrap();
    assert!(keys.contains(&MEMORY_KEY.to_string()));
    assert!(keys.contains(&GLOSSARY_KEY.to_string()));

    let stored: Vec<MemoryEntry> = store.get(MEMORY_KEY).unwrap().unwrap();
    assert_eq!(stored[0].target, "Salut");
    let raw = store.get_raw(MEMORY_KEY).unwrap().unwrap();
    assert!(raw.contains("\"sourceLang\":\"en\""));
}

#[test]
fn test_searchMemory_shouldNotReorderStoredEntries() {
    let mut tm = TranslationMemory::load(KeyValueStore::in_memory().unwrap(), DEFAULT_MAX_ENTRIES);
    tm.add_to_memory("a cat", "un gato", "en", "es").unwrap();
    tm.add_to_memory("a dog", "un perro", "en", "es").unwrap();
    tm.add_to_memory("a dog", "un perro", "en", "es").unwrap();

    let hits = tm.search_memory("a ", "en", "es");
    assert_eq!(hits[0].source, "a dog");

    let stored: Vec<&str> = tm.entries().iter().map(|m| m.source.as_str()).collect();
    assert_eq!(stored, vec!["a dog", "a cat"]);
}

#[test]
fn test_applyGlossary_withNoMatchingTerms_shouldReturnInput() {
    let tm = TranslationMemory::load(KeyValueStore::in_memory().unwrap(), DEFAULT_MAX_ENTRIES);
    assert_eq!(tm.apply_glossary("unchanged text", "en", "es"), "unchanged text");
}
