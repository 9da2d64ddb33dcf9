//! Validation configuration
//!
//! Which crates to scan and which paths to skip.
//!
//! ```ignore
//! let config = ValidateConfig::new("/path/to/workspace")
//!     .with_exclude_pattern("tests/fixtures/");
//! ```

use crate::Result;
use std::path::{Path, PathBuf};

/// Pattern excluded unless the caller clears the defaults
pub const DEFAULT_EXCLUDE: &str = "target/";

/// Configuration for a validation run
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Workspace root, or the root of a single crate
    pub workspace_root: PathBuf,
    /// Patterns to exclude from validation (substring match on the path)
    pub exclude_patterns: Vec<String>,
}

impl ValidateConfig {
    /// Create a new validation config for the given root
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            exclude_patterns: vec![DEFAULT_EXCLUDE.to_string()],
        }
    }

    /// Add an exclude pattern (files/directories matching this will be skipped)
    pub fn with_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Check if a path should be excluded based on patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| path_str.contains(pattern.as_str()))
    }

    /// Crate directories to validate
    ///
    /// Every `crates/*` directory with a `src/` plus the root itself when it
    /// is a package with a `src/`.
    pub fn crate_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        if is_package(&self.workspace_root) {
            dirs.push(self.workspace_root.clone());
        }

        let crates_dir = self.workspace_root.join("crates");
        if crates_dir.is_dir() {
            let mut members = Vec::new();
            for entry in std::fs::read_dir(&crates_dir)? {
                let path = entry?.path();
                if path.join("src").is_dir() && !self.should_exclude(&path) {
                    members.push(path);
                }
            }
            members.sort();
            dirs.extend(members);
        }

        Ok(dirs)
    }
}

fn is_package(dir: &Path) -> bool {
    dir.join("src").is_dir()
        && std::fs::read_to_string(dir.join("Cargo.toml"))
            .is_ok_and(|manifest| manifest.contains("[package]"))
}
