strata::unit! {
    interactor;

    use std::path::Path;

    /// Journal file used when no path is given
    pub const DEFAULT_STORE_FILE: &str = "journal.jsonl";

    /// Validate `note` and store it in the default journal file
    pub fn add_new_entity(note: &entity::Note) -> Result<(), interactor::InteractorError> {
        add_new_entity_at(Path::new(DEFAULT_STORE_FILE), note)
    }

    /// Validate `note` and store it in the journal file at `path`
    pub fn add_new_entity_at(
        path: &Path,
        note: &entity::Note,
    ) -> Result<(), interactor::InteractorError> {
        note.validate()?;
        gateway::store_to_file(path, note)?;
        tracing::info!(title = %note.title, "Added note");
        Ok(())
    }
}
