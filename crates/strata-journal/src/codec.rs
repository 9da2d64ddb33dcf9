strata::unit! {
    gateway;

    use std::path::PathBuf;

    /// Storage failures
    #[derive(Debug, thiserror::Error)]
    pub enum GatewayError {
        #[error("I/O error on {}: {source}", path.display())]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("Malformed record on line {line}: {source}")]
        Decode {
            line: usize,
            #[source]
            source: serde_json::Error,
        },
        #[error("Failed to encode note: {0}")]
        Encode(#[from] serde_json::Error),
        #[error("Stored note on line {line} is invalid: {source}")]
        Invalid {
            line: usize,
            #[source]
            source: entity::EntityError,
        },
    }

    /// Encode a note as one JSON line (without the newline)
    pub fn encode(note: &entity::Note) -> Result<String, GatewayError> {
        Ok(serde_json::to_string(note)?)
    }

    /// Decode and validate the note on line `line` (1-based)
    pub fn decode(text: &str, line: usize) -> Result<entity::Note, GatewayError> {
        let note: entity::Note =
            serde_json::from_str(text).map_err(|source| GatewayError::Decode { line, source })?;
        note.validate()
            .map_err(|source| GatewayError::Invalid { line, source })?;
        Ok(note)
    }

    /// Decode every non-blank line of a journal file
    pub fn decode_all(text: &str) -> Result<Vec<entity::Note>, GatewayError> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| decode(line, index + 1))
            .collect()
    }
}
