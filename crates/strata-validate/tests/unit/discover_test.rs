//! Tests for layer layout discovery

use crate::test_utils::{JOURNAL_REGISTRY, create_layered_crate, single_layout};
use strata_validate::{StrataValidator, ValidateConfig};
use tempfile::TempDir;

#[test]
fn test_declarations_and_units_are_collected() {
    let temp = TempDir::new().unwrap();
    create_layered_crate(
        &temp,
        "journal",
        Some(JOURNAL_REGISTRY),
        &[
            (
                "lib.rs",
                "strata::layers! {\n    pub entity: note;\n    pub gateway: store::disk;\n}\nmod note;\nmod store;\n",
            ),
            ("note.rs", "strata::unit! { entity; pub struct Note; }\n"),
            ("store/mod.rs", "mod disk;\n"),
            (
                "store/disk.rs",
                "strata::unit! {\n    gateway;\n    pub fn save(n: &entity::Note) {}\n}\n",
            ),
        ],
    );

    let layout = single_layout(&temp);

    assert_eq!(layout.name, "journal");
    assert!(layout.config_path.is_some());
    assert_eq!(layout.declarations.len(), 2);
    assert_eq!(layout.declarations[1].units, vec!["disk"]);
    assert_eq!(layout.declarations[1].line, 3);

    let disk = layout.units.iter().find(|u| u.layer == "gateway").unwrap();
    assert_eq!(disk.module.as_deref(), Some("disk"));
    assert_eq!(disk.line, 1);
    assert_eq!(disk.paths.len(), 1);
    assert_eq!(disk.paths[0].text, "entity::Note");
    assert_eq!(disk.paths[0].line, 3);
}

#[test]
fn test_inline_module_names_the_unit() {
    let temp = TempDir::new().unwrap();
    create_layered_crate(
        &temp,
        "inline",
        None,
        &[(
            "lib.rs",
            "mod records { strata::unit! { store; pub struct Record; } }\nstrata::layers! { pub store: records; }\n",
        )],
    );

    let layout = single_layout(&temp);

    assert_eq!(layout.units.len(), 1);
    assert_eq!(layout.units[0].module.as_deref(), Some("records"));
    assert!(!layout.config.has_registry());
}

#[test]
fn test_excluded_paths_are_skipped() {
    let temp = TempDir::new().unwrap();
    create_layered_crate(
        &temp,
        "app",
        None,
        &[
            ("lib.rs", "strata::layers! { pub store: kept; }\nmod kept;\nmod generated;\n"),
            ("kept.rs", "strata::unit! { store; }\n"),
            ("generated.rs", "strata::unit! { store; }\n"),
        ],
    );

    let config = ValidateConfig::new(temp.path()).with_exclude_pattern("generated");
    let layouts = StrataValidator::new(config).layouts().unwrap();

    assert_eq!(layouts[0].units.len(), 1);
    assert_eq!(layouts[0].units[0].module.as_deref(), Some("kept"));
}

#[test]
fn test_crate_root_package_is_scanned() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::write(
        temp.path().join("Cargo.toml"),
        "[package]\nname = \"solo\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("src/lib.rs"),
        "strata::layers! { pub store; }\n",
    )
    .unwrap();

    let layouts = StrataValidator::new(ValidateConfig::new(temp.path())).layouts().unwrap();

    assert_eq!(layouts.len(), 1);
    assert_eq!(layouts[0].name, "solo");
    assert!(layouts[0].declared_layers().contains("store"));
}
