//! Shared test utilities for strata-validate tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::fs;
use std::path::PathBuf;
use strata_validate::{CrateLayout, StrataValidator, UnitViolation, ValidateConfig, Violation};
use tempfile::TempDir;

/// Registry used by most fixtures
pub const JOURNAL_REGISTRY: &str = r#"
[layers.entity]

[layers.gateway]
depends_on = ["entity"]

[layers.interactor]
depends_on = ["entity", "gateway"]
"#;

/// Create `crates/<name>` inside a fresh workspace with the given sources
///
/// `files` are paths relative to the crate's `src/`.
pub fn create_layered_crate(
    temp: &TempDir,
    name: &str,
    strata_toml: Option<&str>,
    files: &[(&str, &str)],
) -> PathBuf {
    let workspace_cargo = temp.path().join("Cargo.toml");
    if !workspace_cargo.exists() {
        fs::write(
            &workspace_cargo,
            r#"[workspace]
members = ["crates/*"]
"#,
        )
        .unwrap();
    }

    let crate_dir = temp.path().join("crates").join(name);
    fs::create_dir_all(crate_dir.join("src")).unwrap();
    fs::write(
        crate_dir.join("Cargo.toml"),
        format!(
            r#"[package]
name = "{name}"
version = "0.1.0"
"#
        ),
    )
    .unwrap();
    if let Some(registry) = strata_toml {
        fs::write(crate_dir.join("strata.toml"), registry).unwrap();
    }
    for (file, content) in files {
        let path = crate_dir.join("src").join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    crate_dir
}

/// Layout of the single crate in `temp`
pub fn single_layout(temp: &TempDir) -> CrateLayout {
    let mut layouts = StrataValidator::new(ValidateConfig::new(temp.path()))
        .layouts()
        .unwrap();
    assert_eq!(layouts.len(), 1);
    layouts.remove(0)
}

/// Ids of the violations, in report order
pub fn ids(violations: &[UnitViolation]) -> Vec<&str> {
    violations.iter().map(Violation::id).collect()
}
