//! Shared test utilities for strata-journal tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::path::PathBuf;
use strata_journal::entity::Note;
use tempfile::TempDir;

/// Path of a not yet existing journal file inside `temp`
pub fn journal_path(temp: &TempDir) -> PathBuf {
    temp.path().join("journal.jsonl")
}

/// Notes with distinct titles and tags, in no particular order
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::new("Weekend", "hike").with_tag("personal"),
        Note::new("Budget", "review Q3").with_tag("work"),
        Note::new("Groceries", "milk, eggs").with_tag("personal"),
    ]
}
