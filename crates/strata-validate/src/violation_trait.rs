//! Violation Trait
//!
//! Uniform view of a rule violation for reporting.

use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

// Re-export Severity from parent module for convenience
pub use super::Severity;

/// Category of violation for grouping in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViolationCategory {
    /// Layer membership and references between layers
    Layering,
    /// Code that would resolve differently once woven into a test
    Weaving,
    /// `strata.toml` layer registry
    Registry,
    /// Unparsable sources and malformed invocations
    Syntax,
}

impl Display for ViolationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layering => write!(f, "Layering"),
            Self::Weaving => write!(f, "Weaving"),
            Self::Registry => write!(f, "Registry"),
            Self::Syntax => write!(f, "Syntax"),
        }
    }
}

/// Generic violation trait
pub trait Violation: Display + Send + Sync {
    /// Unique violation ID (e.g., "STRATA001")
    fn id(&self) -> &str;

    /// Category for grouping in reports
    fn category(&self) -> ViolationCategory;

    /// Severity level
    fn severity(&self) -> Severity;

    /// File where violation occurred (if applicable)
    fn file(&self) -> Option<&PathBuf>;

    /// Human-readable message describing the violation
    fn message(&self) -> String {
        self.to_string()
    }

    /// Suggested fix for the violation (if applicable)
    fn suggestion(&self) -> Option<String> {
        None
    }
}
