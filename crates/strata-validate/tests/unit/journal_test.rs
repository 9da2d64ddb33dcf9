//! Validates the journal crate of this workspace

use std::path::PathBuf;
use strata_validate::{Reporter, StrataValidator, ValidateConfig};

fn journal_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../strata-journal")
}

#[test]
fn test_journal_passes_every_rule() {
    let report = StrataValidator::new(ValidateConfig::new(journal_dir()))
        .validate()
        .unwrap();

    assert!(
        report.violations.is_empty(),
        "{}",
        Reporter::to_human_readable(&report)
    );
    assert_eq!(report.summary.crates_scanned, 1);
    assert_eq!(report.summary.units_scanned, 6);
}

#[test]
fn test_journal_layer_map() {
    let layouts = StrataValidator::new(ValidateConfig::new(journal_dir()))
        .layouts()
        .unwrap();
    let layers = layouts[0].layer_map();

    let gateway: Vec<&str> = layers["gateway"].iter().map(String::as_str).collect();
    assert_eq!(gateway, vec!["codec", "file_store"]);
    let interactor: Vec<&str> = layers["interactor"].iter().map(String::as_str).collect();
    assert_eq!(interactor, vec!["add_entity", "errors", "list_entities"]);
    assert!(layouts[0].config.has_registry());
}
