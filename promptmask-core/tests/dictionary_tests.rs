// promptmask-core/tests/dictionary_tests.rs
use std::io::Write;

use anyhow::Result;
use promptmask_core::{
    validate_mapping, KeywordDictionary, KeywordMapping, MemoryStore, WorkMode, WorkSession,
};

#[test]
fn duplicate_alias_fails_validation_with_a_duplicate_error() {
    let existing = vec![KeywordMapping::new("CompanyX", "T001")];
    let outcome = validate_mapping(&KeywordMapping::new("PersonY", "T001"), &existing);

    assert!(!outcome.is_valid);
    assert!(outcome.errors.iter().any(|e| e.contains("already in use")));
}

#[test]
fn update_path_does_not_collide_with_itself() {
    let mut dict = KeywordDictionary::new();
    assert!(dict.add(KeywordMapping::new("CompanyX", "T001")).is_valid);

    // Same id, same safe key: the uniqueness check must exclude the entry.
    let mut updated = dict.mappings()[0].clone();
    updated.highlight_color = "#FF6B6B".to_string();
    let outcome = dict.update(updated);
    assert!(outcome.is_valid, "{:?}", outcome.errors);
}

#[test]
fn reserved_sensitive_key_is_rejected_with_all_errors_reported() {
    let existing = vec![KeywordMapping::new("CompanyX", "T001")];
    // Reserved sensitive key AND duplicate alias: both problems reported.
    let outcome = validate_mapping(&KeywordMapping::new("return", "t001"), &existing);

    assert!(!outcome.is_valid);
    assert_eq!(outcome.errors.len(), 2);
}

#[test]
fn dictionary_round_trips_through_a_key_value_store() -> Result<()> {
    let store = MemoryStore::new();
    let mut dict = KeywordDictionary::new();
    dict.add(KeywordMapping::new("CompanyX", "T001"));
    dict.add(KeywordMapping::new("武科電", "WKTECH_01"));
    dict.save_to_store(&store)?;

    let loaded = KeywordDictionary::load_from_store(&store)?;
    assert_eq!(loaded.mappings(), dict.mappings());
    Ok(())
}

#[test]
fn loading_from_an_empty_store_yields_an_empty_dictionary() -> Result<()> {
    let store = MemoryStore::new();
    let loaded = KeywordDictionary::load_from_store(&store)?;
    assert!(loaded.is_empty());
    Ok(())
}

#[test]
fn dictionary_loads_from_a_yaml_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "mappings:\n  - sensitive_key: CompanyX\n    safe_key: T001\n  - sensitive_key: PersonY\n    safe_key: Dev_A\n    highlight_color: \"#ABC\""
    )?;

    let dict = KeywordDictionary::load_from_file(file.path())?;
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.mappings()[0].sensitive_key, "CompanyX");
    // Entries without a color get one from the default palette.
    assert!(!dict.mappings()[0].highlight_color.is_empty());
    assert_eq!(dict.mappings()[1].highlight_color, "#ABC");
    Ok(())
}

#[test]
fn invalid_yaml_entries_fail_the_file_load() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "mappings:\n  - sensitive_key: CompanyX\n    safe_key: T001\n  - sensitive_key: PersonY\n    safe_key: T001"
    )?;

    let result = KeywordDictionary::load_from_file(file.path());
    assert!(result.is_err());
    Ok(())
}

#[test]
fn work_session_round_trips_detection_state() -> Result<()> {
    use promptmask_core::{AhoCorasickEngine, KeywordEngine};

    let engine = AhoCorasickEngine::new();
    let dictionary = vec![KeywordMapping::new("CompanyX", "T001")];
    let detected = engine.detect("CompanyX twice: CompanyX", &dictionary)?;

    let store = MemoryStore::new();
    let mut session = WorkSession::new();
    session.mode = WorkMode::Mask;
    session.source_text = "CompanyX twice: CompanyX".to_string();
    session.detected_keywords = detected.clone();
    session.save(&store)?;

    let loaded = WorkSession::load(&store)?.expect("session present");
    assert_eq!(loaded.detected_keywords, detected);
    assert_eq!(loaded.mode, WorkMode::Mask);
    Ok(())
}
