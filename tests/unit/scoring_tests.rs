/*!
 * Tests for the heuristic scorers: quality, detection confidence and
 * pronunciation
 */

use tolk::translation::detection::{Detection, Script, calculate_confidence, detect_scripts};
use tolk::translation::quality::{BASE_SCORE, stars_for};
use tolk::translation::{QualityScore, generate_pronunciation, score_translation};

#[test]
fn test_scoreTranslation_withMatchingShape_shouldReachMaximum() {
    assert_eq!(score_translation("Hello.", "Hola."), 100);
    assert_eq!(QualityScore::of("Hello.", "Hola.").stars, 5);
}

#[test]
fn test_scoreTranslation_shouldStayInRange() {
    let samples = [
        ("", ""),
        ("a", ""),
        ("", "a"),
        ("Hello, world!", "x"),
        ("短い", "a much longer translation than the original"),
        ("One two three.", "Uno dos tres."),
    ];
    for (original, translation) in samples {
        let score = score_translation(original, translation);
        assert!((BASE_SCORE..=100).contains(&score), "{original:?} -> {score}");
    }
}

#[test]
fn test_scoreTranslation_withLowercaseStart_shouldLoseCapitalBonus() {
    assert_eq!(score_translation("Hello.", "hola."), 95);
}

#[test]
fn test_starsFor_shouldFollowThresholds() {
    assert_eq!(stars_for(100), 5);
    assert_eq!(stars_for(90), 5);
    assert_eq!(stars_for(89), 4);
    assert_eq!(stars_for(75), 4);
    assert_eq!(stars_for(74), 3);
    assert_eq!(stars_for(70), 3);
}

#[test]
fn test_calculateConfidence_shouldScaleWithLength() {
    assert_eq!(calculate_confidence("short"), 50);
    assert_eq!(calculate_confidence(&"a".repeat(50)), 70);
    assert_eq!(calculate_confidence(&"a".repeat(150)), 80);
    assert_eq!(calculate_confidence(&"a".repeat(400)), 90);
}

#[test]
fn test_calculateConfidence_withMixedScripts_shouldPenalize() {
    let text = "Hello there, Привет всем вокруг";
    assert_eq!(detect_scripts(text).len(), 2);
    assert_eq!(calculate_confidence(text), 55);
}

#[test]
fn test_calculateConfidence_shouldBeBounded() {
    for text in ["", "Привет hi", "x", &"ab".repeat(1000)] {
        assert!(calculate_confidence(text) <= 100);
    }
    assert_eq!(calculate_confidence("Ж x"), 35);
}

#[test]
fn test_script_shouldClassifyBlocks() {
    assert_eq!(Script::of('Q'), Some(Script::Latin));
    assert_eq!(Script::of('Я'), Some(Script::Cyrillic));
    assert_eq!(Script::of('ب'), Some(Script::Arabic));
    assert_eq!(Script::of('中'), Some(Script::Cjk));
    assert_eq!(Script::of('7'), None);
}

#[test]
fn test_detection_shouldCarryLanguageName() {
    let detection = Detection::new("ru", "Привет, как дела?");
    assert_eq!(detection.language_name, "Russian");
    assert_eq!(detection.confidence, 50);
    assert_eq!(Detection::unknown().confidence, 0);
}

#[test]
fn test_generatePronunciation_shouldUseLanguageTables() {
    assert_eq!(generate_pronunciation("Think", "en"), "θink");
    assert_eq!(generate_pronunciation("Calle", "es"), "caye");
    assert_eq!(generate_pronunciation("Gâteau", "fr"), "gâto");
    assert_eq!(generate_pronunciation("Ich", "de"), "iχ");
    assert_eq!(generate_pronunciation("Ciao", "it"), "[Ciao]");
}
