//! Tests for the gateway layer against real files

use crate::test_utils::{journal_path, sample_notes};
use strata_journal::entity::Note;
use strata_journal::gateway::{self, GatewayError};
use tempfile::TempDir;

#[test]
fn test_store_appends_one_line_per_note() {
    let temp = TempDir::new().unwrap();
    let path = journal_path(&temp);

    for note in sample_notes() {
        gateway::store_to_file(&path, &note).unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(gateway::load_from_file(&path).unwrap(), sample_notes());
}

#[test]
fn test_missing_file_is_an_empty_journal() {
    let temp = TempDir::new().unwrap();
    assert!(gateway::load_from_file(&journal_path(&temp)).unwrap().is_empty());
}

#[test]
fn test_encoding_omits_empty_tags() {
    let line = gateway::encode(&Note::new("Plain", "text")).unwrap();
    assert_eq!(line, r#"{"title":"Plain","body":"text"}"#);
}

#[test]
fn test_malformed_line_reports_its_number() {
    let text = "{\"title\":\"ok\",\"body\":\"\"}\n\nnot json\n";
    match gateway::decode_all(text) {
        Err(GatewayError::Decode { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[test]
fn test_stored_note_is_validated_on_load() {
    let temp = TempDir::new().unwrap();
    let path = journal_path(&temp);
    std::fs::write(&path, "{\"title\":\"\",\"body\":\"lost\"}\n").unwrap();

    match gateway::load_from_file(&path) {
        Err(GatewayError::Invalid { line, .. }) => assert_eq!(line, 1),
        other => panic!("Expected Invalid error, got {other:?}"),
    }
}
