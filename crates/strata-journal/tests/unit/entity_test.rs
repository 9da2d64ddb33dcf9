//! Tests for the entity layer rules

use strata_journal::entity::{EntityError, MAX_TITLE_LEN, Note};

#[test]
fn test_valid_note_passes() {
    let note = Note::new("Groceries", "milk").with_tag("home");
    assert_eq!(note.validate(), Ok(()));
}

#[test]
fn test_blank_title_is_rejected() {
    assert_eq!(
        Note::new("   ", "body").validate(),
        Err(EntityError::EmptyTitle)
    );
}

#[test]
fn test_overlong_title_is_rejected() {
    let note = Note::new("x".repeat(MAX_TITLE_LEN + 1), "");
    assert_eq!(
        note.validate(),
        Err(EntityError::TitleTooLong {
            len: MAX_TITLE_LEN + 1,
            max: MAX_TITLE_LEN,
        })
    );
}

#[test]
fn test_tag_with_whitespace_is_rejected() {
    let note = Note::new("Trip", "").with_tag("two words");
    assert_eq!(
        note.validate(),
        Err(EntityError::InvalidTag("two words".to_string()))
    );
}

#[test]
fn test_tags_stay_unique() {
    let note = Note::new("Trip", "").with_tag("travel").with_tag("travel");
    assert_eq!(note.tags, vec!["travel"]);
    assert!(note.has_tag("travel"));
    assert!(!note.has_tag("work"));
}
