strata::unit! {
    entity;

    use serde::{Deserialize, Serialize};

    /// Longest title a note may carry, in characters
    pub const MAX_TITLE_LEN: usize = 120;

    /// A single journal entry
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Note {
        pub title: String,
        pub body: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub tags: Vec<String>,
    }

    /// Reasons a note is not acceptable
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum EntityError {
        #[error("Note title must not be empty")]
        EmptyTitle,
        #[error("Note title is {len} characters long, the limit is {max}")]
        TitleTooLong { len: usize, max: usize },
        #[error("Invalid tag `{0}`: tags are single words")]
        InvalidTag(String),
    }

    impl Note {
        pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
            Self {
                title: title.into(),
                body: body.into(),
                tags: Vec::new(),
            }
        }

        /// Add a tag, keeping tags unique
        #[must_use]
        pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
            self
        }

        pub fn has_tag(&self, tag: &str) -> bool {
            self.tags.iter().any(|t| t == tag)
        }

        /// Check the note against the journal's rules
        pub fn validate(&self) -> Result<(), EntityError> {
            let title = self.title.trim();
            if title.is_empty() {
                return Err(EntityError::EmptyTitle);
            }
            let len = title.chars().count();
            if len > MAX_TITLE_LEN {
                return Err(EntityError::TitleTooLong {
                    len,
                    max: MAX_TITLE_LEN,
                });
            }
            if let Some(tag) = self
                .tags
                .iter()
                .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
            {
                return Err(EntityError::InvalidTag(tag.clone()));
            }
            Ok(())
        }
    }
}
