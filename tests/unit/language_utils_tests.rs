/*!
 * Tests for language code utilities
 */

use tolk::language_utils::{base_code, display_name, get_language_name};

#[test]
fn test_getLanguageName_withThreeLetterCode_shouldResolve() {
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert_eq!(get_language_name("zh-TW").unwrap(), "Chinese");
    assert!(get_language_name("??").is_err());
}

#[test]
fn test_getLanguageName_withAuto_shouldDescribeDetection() {
    assert_eq!(get_language_name("auto").unwrap(), "Detect language");
    assert_eq!(get_language_name("AUTO").unwrap(), "Detect language");
}

#[test]
fn test_displayName_shouldNeverFail() {
    assert_eq!(display_name("es"), "Spanish");
    assert_eq!(display_name("pt-PT"), "Portuguese");
    assert_eq!(display_name("unknown"), "unknown");
}

#[test]
fn test_baseCode_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(base_code(""), "");
}
