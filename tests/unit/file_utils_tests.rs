/*!
 * Tests for file input and export utilities
 */

use tolk::errors::TranslationError;
use tolk::file_utils::FileManager;

use crate::common;

#[test]
fn test_readTextInput_withTxtFile_shouldReturnContent() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "input.txt", "Bonjour le monde").unwrap();

    assert_eq!(FileManager::read_text_input(&path).unwrap(), "Bonjour le monde");
}

#[test]
fn test_readTextInput_withOtherExtension_shouldBeUnsupported() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "input.pdf", "%PDF-1.7").unwrap();

    let err = FileManager::read_text_input(&path).unwrap_err();
    assert!(matches!(err, TranslationError::UnsupportedInput(_)));
}

#[test]
fn test_readTextInput_withBinaryContent_shouldBeUnsupported() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = FileManager::read_text_input(&path).unwrap_err();
    assert!(matches!(err, TranslationError::UnsupportedInput(_)));
}

#[test]
fn test_readBatchLines_shouldSkipBlankLines() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "batch.txt", "one\n\n two \n\nthree\n").unwrap();

    assert_eq!(
        FileManager::read_batch_lines(&path).unwrap(),
        vec!["one", "two", "three"]
    );
}

#[test]
fn test_writeAtomic_shouldCreateParentsAndReplaceContent() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("exports").join("result.csv");

    FileManager::write_atomic(&path, "first").unwrap();
    FileManager::write_atomic(&path, "second").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_exportPath_shouldUseExtension() {
    let path = FileManager::export_path("/tmp/out", "json");
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("batch-translation-"));
    assert!(name.ends_with(".json"));
}
