// promptmask-core/tests/mask_restore_tests.rs
use anyhow::Result;
use promptmask_core::{
    headless_mask_string, AhoCorasickEngine, KeywordEngine, KeywordMapping,
};

fn mapping(sensitive: &str, safe: &str) -> KeywordMapping {
    KeywordMapping::new(sensitive, safe)
}

#[test]
fn masking_replaces_all_selected_occurrences() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "CompanyX is great";
    let detected = engine.detect(text, &[mapping("CompanyX", "T-Company")])?;

    let result = engine.apply_mask(text, &detected)?;
    assert_eq!(result.masked_text, "T-Company is great");
    assert_eq!(result.replaced_count, 1);
    assert_eq!(result.skipped_count, 0);
    Ok(())
}

#[test]
fn deselected_group_is_left_verbatim() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "CompanyX is great";
    let mut detected = engine.detect(text, &[mapping("CompanyX", "T-Company")])?;
    detected[0].is_selected = false;

    let result = engine.apply_mask(text, &detected)?;
    assert_eq!(result.masked_text, text);
    assert_eq!(result.replaced_count, 0);
    assert_eq!(result.skipped_count, 1);
    assert!(result.details.is_empty());
    Ok(())
}

#[test]
fn deselected_occurrence_is_skipped_individually() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "CompanyX and CompanyX";
    let mut detected = engine.detect(text, &[mapping("CompanyX", "T-Company")])?;
    detected[0].occurrences[1].is_selected = false;

    let result = engine.apply_mask(text, &detected)?;
    assert_eq!(result.masked_text, "T-Company and CompanyX");
    assert_eq!(result.replaced_count, 1);
    assert_eq!(result.skipped_count, 1);
    Ok(())
}

#[test]
fn mask_details_report_each_group() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "CompanyX and PersonY";
    let dictionary = vec![mapping("CompanyX", "T-Company"), mapping("PersonY", "Dev_A")];
    let detected = engine.detect(text, &dictionary)?;

    let result = engine.apply_mask(text, &detected)?;
    assert_eq!(result.details.len(), 2);
    assert!(result
        .details
        .iter()
        .any(|d| d.original == "CompanyX" && d.replacement == "T-Company" && d.occurrence_count == 1));
    assert!(result
        .details
        .iter()
        .any(|d| d.original == "PersonY" && d.replacement == "Dev_A"));
    Ok(())
}

#[test]
fn replacements_with_different_lengths_do_not_shift_earlier_spans() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "A CompanyX B CompanyX C CompanyX";
    let detected = engine.detect(text, &[mapping("CompanyX", "T1")])?;

    let result = engine.apply_mask(text, &detected)?;
    assert_eq!(result.masked_text, "A T1 B T1 C T1");
    assert_eq!(result.replaced_count, 3);
    Ok(())
}

#[test]
fn restore_of_empty_text_echoes_input() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let result = engine.restore_text("", &[mapping("CompanyX", "T001")])?;
    assert_eq!(result.restored_text, "");
    assert_eq!(result.restored_count, 0);
    Ok(())
}

#[test]
fn restore_with_empty_dictionary_echoes_input() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let result = engine.restore_text("Some text with T001 code.", &[])?;
    assert_eq!(result.restored_text, "Some text with T001 code.");
    assert_eq!(result.restored_count, 0);
    Ok(())
}

#[test]
fn restore_replaces_every_alias_occurrence() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let result = engine.restore_text(
        "T001 has a subsidiary also called T001.",
        &[mapping("CompanyX", "T001")],
    )?;

    assert_eq!(result.restored_text, "CompanyX has a subsidiary also called CompanyX.");
    assert_eq!(result.restored_count, 2);
    Ok(())
}

#[test]
fn restore_matches_aliases_case_insensitively() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let result = engine.restore_text("Use T001 not t001.", &[mapping("CompanyX", "T001")])?;

    assert_eq!(result.restored_text, "Use CompanyX not CompanyX.");
    assert_eq!(result.restored_count, 2);
    Ok(())
}

#[test]
fn restore_applies_no_embedded_word_suppression() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    // "aka" sits between letters; detection would skip it, restoration must not.
    let result = engine.restore_text("breakageX", &[mapping("CompanyX", "aka")])?;
    assert_eq!(result.restored_text, "breCompanyXgeX");
    assert_eq!(result.restored_count, 1);
    Ok(())
}

#[test]
fn alias_substring_of_another_alias_restores_longest_first() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let dictionary = vec![
        mapping("Alpha", "T001"),
        mapping("AlphaExtended", "T00123"),
    ];
    let result = engine.restore_text("The T001 and T00123 codes.", &dictionary)?;

    assert_eq!(result.restored_text, "The Alpha and AlphaExtended codes.");
    assert_eq!(result.restored_count, 2);
    Ok(())
}

#[test]
fn restore_details_use_dictionary_order() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let dictionary = vec![mapping("CompanyX", "T001"), mapping("PersonY", "Dev_A")];
    let result = engine.restore_text("Dev_A met T001 and T001.", &dictionary)?;

    assert_eq!(result.details.len(), 2);
    assert_eq!(result.details[0].original, "T001");
    assert_eq!(result.details[0].replacement, "CompanyX");
    assert_eq!(result.details[0].occurrence_count, 2);
    assert_eq!(result.details[1].original, "Dev_A");
    Ok(())
}

#[test]
fn restore_handles_cjk_sensitive_keys() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let result = engine.restore_text("WKTECH_01 的產品很好。", &[mapping("武科電", "WKTECH_01")])?;

    assert_eq!(result.restored_text, "武科電 的產品很好。");
    assert_eq!(result.restored_count, 1);
    Ok(())
}

#[test]
fn mask_then_restore_round_trips_exactly() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let dictionary = vec![
        mapping("CompanyX", "T001"),
        mapping("PersonY", "Dev_A"),
        mapping("武科電", "WKTECH_01"),
    ];
    let text = "PersonY of CompanyX 拜訪武科電。\nCOMPANYX and persony again.";

    let detected = engine.detect(text, &dictionary)?;
    let masked = engine.apply_mask(text, &detected)?;
    assert_ne!(masked.masked_text, text);

    let restored = engine.restore_text(&masked.masked_text, &dictionary)?;
    assert_eq!(restored.restored_text, text.replace("COMPANYX", "CompanyX").replace("persony", "PersonY"));
    assert_eq!(restored.restored_count, masked.replaced_count);
    Ok(())
}

#[test]
fn round_trip_preserves_text_exactly_when_casing_matches() -> Result<()> {
    let dictionary = vec![
        mapping("Alpha", "T001"),
        mapping("AlphaExtended", "T00123"),
    ];
    let text = "Alpha shipped AlphaExtended to Alpha.";

    let masked = headless_mask_string(text, &dictionary)?;
    assert_eq!(masked.masked_text, "T001 shipped T00123 to T001.");

    let engine = AhoCorasickEngine::new();
    let restored = engine.restore_text(&masked.masked_text, &dictionary)?;
    assert_eq!(restored.restored_text, text);
    Ok(())
}

#[test]
fn unmasked_text_restores_to_itself() -> Result<()> {
    let engine = AhoCorasickEngine::new();
    let text = "No aliases in this text.";
    let result = engine.restore_text(text, &[mapping("CompanyX", "T001")])?;
    assert_eq!(result.restored_text, text);
    assert_eq!(result.restored_count, 0);
    assert!(result.details.is_empty());
    Ok(())
}
