//! Tests for the library functions behind the `check` and `scope` commands

use crate::test_utils::{JOURNAL_REGISTRY, create_layered_crate};
use strata_core::Mode;
use strata_validate::{StrataValidator, ValidateConfig, ValidationError, resolve_scope};
use tempfile::TempDir;

#[test]
fn test_scope_uses_configured_suffixes() {
    let temp = TempDir::new().unwrap();
    let crate_dir = create_layered_crate(
        &temp,
        "journal",
        Some("[mode]\ntest_suffix = \"_mock\"\n\n[layers.gateway]\n"),
        &[("lib.rs", "strata::layers! { pub gateway; }\n")],
    );

    assert_eq!(
        resolve_scope("gateway", Mode::Production, &crate_dir).unwrap(),
        "gateway_impl"
    );
    assert_eq!(
        resolve_scope("gateway", Mode::Test, &crate_dir).unwrap(),
        "gateway_mock"
    );
}

#[test]
fn test_scope_of_unregistered_layer_is_rejected() {
    let temp = TempDir::new().unwrap();
    let crate_dir = create_layered_crate(&temp, "journal", Some(JOURNAL_REGISTRY), &[]);

    let err = resolve_scope("storage", Mode::Production, &crate_dir).unwrap_err();

    assert!(matches!(err, ValidationError::Config(_)), "{err}");
    assert!(err.to_string().contains("storage"), "{err}");
}

#[test]
fn test_check_exit_status_follows_errors() {
    let temp = TempDir::new().unwrap();
    create_layered_crate(
        &temp,
        "clean",
        Some(JOURNAL_REGISTRY),
        &[
            ("lib.rs", "strata::layers! { pub entity: note; }\nmod note;\n"),
            ("note.rs", "strata::unit! { entity; pub struct Note; }\n"),
        ],
    );
    let report = StrataValidator::new(ValidateConfig::new(temp.path()))
        .validate()
        .unwrap();
    assert_eq!(report.exit_status(), 0);

    create_layered_crate(
        &temp,
        "leaky",
        Some(JOURNAL_REGISTRY),
        &[
            ("lib.rs", "strata::layers! { pub entity: note; }\nmod note;\n"),
            ("note.rs", "strata::unit! { entity; pub struct Note(crate::Id); }\n"),
        ],
    );
    let report = StrataValidator::new(ValidateConfig::new(temp.path()))
        .validate()
        .unwrap();
    assert_eq!(report.summary.error_count, 1);
    assert_eq!(report.exit_status(), 1);
}
