//! Tests for how this test crate sees the library's layers
//!
//! Integration tests link the library built for production, so its aliases
//! resolve to the `_impl` scopes even though this crate is a test build.

use crate::test_utils::journal_path;
use std::any::{TypeId, type_name};
use strata_journal::{entity, entity_impl, interactor};
use tempfile::TempDir;

#[test]
fn test_linked_library_resolves_production_scopes() {
    let name = type_name::<entity::Note>();
    assert!(name.contains("entity_impl"), "{name}");
    assert!(!name.contains("entity_test"), "{name}");
}

#[test]
fn test_alias_is_transparent() {
    assert_eq!(
        TypeId::of::<entity::Note>(),
        TypeId::of::<entity_impl::Note>()
    );
    assert_eq!(
        TypeId::of::<interactor::InteractorError>(),
        TypeId::of::<strata_journal::interactor_impl::InteractorError>()
    );
}

#[test]
fn test_real_use_cases_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = journal_path(&temp);
    let note = entity::Note::new("Budget", "review").with_tag("work");

    interactor::add_new_entity_at(&path, &note).unwrap();

    assert_eq!(
        interactor::list_entities_at(&path).unwrap(),
        vec![note.clone()]
    );
    assert_eq!(interactor::find_entity(&path, "Budget").unwrap(), note);
    assert!(matches!(
        interactor::find_entity(&path, "Missing"),
        Err(interactor::InteractorError::NotFound(title)) if title == "Missing"
    ));
}
