//! Tests for report generation

use crate::test_utils::{JOURNAL_REGISTRY, create_layered_crate};
use strata_validate::{Reporter, StrataValidator, ValidateConfig};
use tempfile::TempDir;

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    create_layered_crate(
        &temp,
        "journal",
        Some(JOURNAL_REGISTRY),
        &[
            ("lib.rs", "strata::layers! { pub entity: note; }\nmod note;\nmod stray;\n"),
            ("note.rs", "strata::unit! { entity; pub struct Note; }\n"),
            ("stray.rs", "strata::unit! { entity; }\n"),
        ],
    );
    temp
}

#[test]
fn test_warnings_do_not_fail_validation() {
    let temp = fixture();

    let report = StrataValidator::new(ValidateConfig::new(temp.path()))
        .validate()
        .unwrap();

    assert_eq!(report.summary.total_violations, 1);
    assert_eq!(report.summary.warning_count, 1);
    assert_eq!(report.summary.error_count, 0);
    assert_eq!(report.summary.units_scanned, 2);
    assert!(report.summary.passed);
}

#[test]
fn test_json_report_carries_summary_and_layers() {
    let temp = fixture();
    let report = StrataValidator::new(ValidateConfig::new(temp.path()))
        .validate()
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&Reporter::to_json(&report).unwrap()).unwrap();

    assert_eq!(json["summary"]["passed"], true);
    assert_eq!(json["summary"]["by_category"]["Layering"], 1);
    assert_eq!(json["crates"][0]["name"], "journal");
    assert_eq!(json["crates"][0]["layers"]["entity"][0], "note");
    assert!(json["violations"][0]["UnlistedUnit"].is_object());
    assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
}

#[test]
fn test_human_report_lists_violations_with_hints() {
    let temp = fixture();
    let report = StrataValidator::new(ValidateConfig::new(temp.path()))
        .validate()
        .unwrap();

    let text = Reporter::to_human_readable(&report);

    assert!(text.contains("Status: PASSED"), "{text}");
    assert!(text.contains("[WARNING] STRATA004 (Layering)"), "{text}");
    assert!(text.contains("  Layering:       1\n"), "{text}");
    assert!(
        text.contains("hint: Add `stray` to the `entity` entry"),
        "{text}"
    );
}

#[test]
fn test_layer_listing() {
    let temp = fixture();
    let layouts = StrataValidator::new(ValidateConfig::new(temp.path()))
        .layouts()
        .unwrap();

    let text = Reporter::to_layer_listing(&layouts);

    assert!(text.starts_with("journal\n"), "{text}");
    assert!(text.contains("  entity: note\n"), "{text}");
}
