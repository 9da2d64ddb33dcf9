//! # strata-validate
//!
//! Checks that a workspace built with the `strata` macros respects its layer
//! rules. Every crate's sources are parsed with `syn`; `layers!`
//! declarations and `unit!` sites are collected and checked against the
//! crate's `strata.toml`.
//!
//! | Id | Severity | Rule |
//! |----|----------|------|
//! | STRATA001 | Error | unit layer is not a known layer |
//! | STRATA002 | Error | unit references a layer outside its `depends_on` |
//! | STRATA003 | Error | unit body uses a `crate::` path |
//! | STRATA004 | Warning | unit module is not listed by any `layers!` |
//! | STRATA005 | Error | `depends_on` graph has a cycle |
//! | STRATA006 | Error | unparsable file, malformed invocation, or a layer wrapped twice in a module |
//!
//! ## Example
//!
//! ```ignore
//! use strata_validate::{Reporter, StrataValidator, ValidateConfig};
//!
//! let config = ValidateConfig::new(".").with_exclude_pattern("tests/fixtures/");
//! let report = StrataValidator::new(config).validate()?;
//! println!("{}", Reporter::to_human_readable(&report));
//! ```

pub mod config;
pub mod discover;
pub mod layer_rules;
pub mod logging;
pub mod reporter;
pub mod scan;
pub mod violation_trait;

pub use config::ValidateConfig;
pub use discover::{CollectedPath, CrateLayout, LayerDeclaration, Malformed, UnitSite};
pub use layer_rules::{LayerRules, UnitViolation, find_cycle};
pub use reporter::{Reporter, ValidationReport, ValidationSummary};
pub use violation_trait::{Violation, ViolationCategory};

use std::path::{Path, PathBuf};
use strata_core::{Mode, StrataConfig, scope_name};
use thiserror::Error;
use tracing::{debug, info};

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] strata_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Severity level for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Runs every layer rule over every crate of a workspace
pub struct StrataValidator {
    config: ValidateConfig,
}

impl StrataValidator {
    pub fn new(config: ValidateConfig) -> Self {
        Self { config }
    }

    /// Discover the layer layout of every crate
    pub fn layouts(&self) -> Result<Vec<CrateLayout>> {
        self.config
            .crate_dirs()?
            .iter()
            .map(|dir| CrateLayout::discover(dir, &self.config))
            .collect()
    }

    /// Validate all crates and build a report
    pub fn validate(&self) -> Result<ValidationReport> {
        let layouts = self.layouts()?;
        let mut violations = Vec::new();
        for layout in &layouts {
            let found = LayerRules::new(layout).check();
            debug!(crate_name = %layout.name, violations = found.len(), "Checked crate");
            violations.extend(found);
        }
        let report = ValidationReport::new(&self.config.workspace_root, &layouts, violations);
        info!(
            crates = report.summary.crates_scanned,
            violations = report.summary.total_violations,
            passed = report.summary.passed,
            "Validation finished"
        );
        Ok(report)
    }
}

/// Scope module `layer` resolves to in `mode`, using the `strata.toml`
/// discovered from `config_dir`
pub fn resolve_scope(layer: &str, mode: Mode, config_dir: &Path) -> Result<String> {
    let config = StrataConfig::load_for_manifest_dir(config_dir)?;
    config.check_layer(layer)?;
    Ok(scope_name(layer, mode, &config.mode))
}
