strata::unit! {
    interactor;

    use std::path::Path;

    /// All notes of the default journal, ordered by title
    pub fn list_entities() -> Result<Vec<entity::Note>, interactor::InteractorError> {
        list_entities_at(Path::new(interactor::DEFAULT_STORE_FILE))
    }

    /// All notes of the journal at `path`, ordered by title
    pub fn list_entities_at(path: &Path) -> Result<Vec<entity::Note>, interactor::InteractorError> {
        let mut notes = gateway::load_from_file(path)?;
        notes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(notes)
    }

    /// Notes carrying `tag`, ordered by title
    pub fn find_by_tag(
        path: &Path,
        tag: &str,
    ) -> Result<Vec<entity::Note>, interactor::InteractorError> {
        let mut notes = list_entities_at(path)?;
        notes.retain(|note| note.has_tag(tag));
        Ok(notes)
    }

    /// The first note titled `title`
    pub fn find_entity(
        path: &Path,
        title: &str,
    ) -> Result<entity::Note, interactor::InteractorError> {
        list_entities_at(path)?
            .into_iter()
            .find(|note| note.title == title)
            .ok_or_else(|| interactor::InteractorError::NotFound(title.to_string()))
    }
}
