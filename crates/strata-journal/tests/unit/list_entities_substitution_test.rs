//! Tests for `list_entities` against a substituted journal source

use crate::test_utils::sample_notes;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use strata_journal::{entity, interactor};

thread_local! {
    static LOADED_FROM: RefCell<Vec<PathBuf>> = const { RefCell::new(Vec::new()) };
}

strata::substitute! {
    strata_journal::gateway {
        pub fn load_from_file(path: &Path) -> Result<Vec<entity::Note>, GatewayError> {
            LOADED_FROM.with(|loaded| loaded.borrow_mut().push(path.to_path_buf()));
            Ok(sample_notes())
        }
    }
}

strata::weave! { mod list_entities = "src/list_entities.rs"; }

use list_entities::interactor_test as listing;

fn reset() {
    LOADED_FROM.with(|loaded| loaded.borrow_mut().clear());
}

fn titles(notes: &[entity::Note]) -> Vec<&str> {
    notes.iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn test_list_reads_default_file_and_sorts() {
    reset();

    let notes = listing::list_entities().unwrap();

    assert_eq!(titles(&notes), vec!["Budget", "Groceries", "Weekend"]);
    LOADED_FROM.with(|loaded| {
        assert_eq!(
            *loaded.borrow(),
            vec![PathBuf::from(interactor::DEFAULT_STORE_FILE)]
        );
    });
}

#[test]
fn test_find_by_tag_filters() {
    reset();

    let notes = listing::find_by_tag(Path::new("any.jsonl"), "personal").unwrap();

    assert_eq!(titles(&notes), vec!["Groceries", "Weekend"]);
}

#[test]
fn test_find_entity_reports_missing_title() {
    reset();

    let result = listing::find_entity(Path::new("any.jsonl"), "Taxes");

    assert!(
        matches!(result, Err(interactor::InteractorError::NotFound(title)) if title == "Taxes")
    );
}
