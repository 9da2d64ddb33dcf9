strata::unit! {
    gateway;

    use std::fs::OpenOptions;
    use std::io::{ErrorKind, Write};
    use std::path::Path;

    /// Append `note` to the journal file at `path`, creating it if needed
    pub fn store_to_file(path: &Path, note: &entity::Note) -> Result<(), gateway::GatewayError> {
        let line = gateway::encode(note)?;
        let io = |source| gateway::GatewayError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io)?;
        writeln!(file, "{line}").map_err(io)?;

        tracing::debug!(path = %path.display(), title = %note.title, "Stored note");
        Ok(())
    }

    /// Read every note of the journal file at `path`
    ///
    /// A missing file is an empty journal.
    pub fn load_from_file(path: &Path) -> Result<Vec<entity::Note>, gateway::GatewayError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "No journal file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(gateway::GatewayError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let notes = gateway::decode_all(&text)?;
        tracing::debug!(path = %path.display(), count = notes.len(), "Loaded notes");
        Ok(notes)
    }
}
