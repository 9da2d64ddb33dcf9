//! Scope name derivation
//!
//! A layer's items never live directly under the layer's own name. They live
//! in a *scope* module whose name is derived from the layer name and the
//! current build mode:
//!
//! ```text
//! scope_name("gateway", Production) == "gateway_impl"
//! scope_name("gateway", Test)       == "gateway_test"
//! ```
//!
//! The derivation is total and pure, so two independent expansions for the
//! same layer and mode always target the same module. With the constraints
//! enforced by [`validate_suffixes`] and [`validate_layer_name`] it is also
//! injective, and no derived scope can equal a layer alias name.

use crate::config::ModeConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Build mode a compilation resolves layers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Alias resolves to the real implementation scope
    Production,
    /// Alias resolves to the per-test scope
    Test,
}

impl Mode {
    /// Both modes, production first
    pub const ALL: [Mode; 2] = [Mode::Production, Mode::Test];

    /// Scope suffix for this mode
    pub fn suffix(self, mode: &ModeConfig) -> &str {
        match self {
            Self::Production => &mode.impl_suffix,
            Self::Test => &mode.test_suffix,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "impl" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!("Invalid mode: {other}. Use production or test")),
        }
    }
}

/// Derive the scope module name for `layer` in `mode`
pub fn scope_name(layer: &str, mode: Mode, config: &ModeConfig) -> String {
    format!("{layer}{}", mode.suffix(config))
}

/// Check that a layer name can take part in the derivation
///
/// A layer name must be a plain Rust identifier (no keywords, no `r#`
/// prefix, not `_`) and must not end with either scope suffix; otherwise the
/// alias of one layer could be the scope of another.
pub fn validate_layer_name(name: &str, config: &ModeConfig) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidLayerName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.starts_with("r#") {
        return Err(invalid("raw identifiers cannot name a layer"));
    }
    if syn::parse_str::<syn::Ident>(name).is_err() {
        return Err(invalid("not a valid Rust identifier"));
    }
    for suffix in [&config.impl_suffix, &config.test_suffix] {
        if name.ends_with(suffix.as_str()) {
            return Err(invalid(&format!("ends with the scope suffix `{suffix}`")));
        }
    }
    Ok(())
}

/// Check the pair of scope suffixes
///
/// Both suffixes must be non-empty identifier continuations, and neither
/// may end with the other. The last rule keeps production and test scopes
/// disjoint for every pair of layer names.
pub fn validate_suffixes(config: &ModeConfig) -> Result<()> {
    let invalid = |suffix: &str, reason: &str| Error::InvalidSuffix {
        suffix: suffix.to_string(),
        reason: reason.to_string(),
    };

    for suffix in [&config.impl_suffix, &config.test_suffix] {
        if suffix.is_empty() {
            return Err(invalid(suffix, "must not be empty"));
        }
        if !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                suffix,
                "only ASCII letters, digits and `_` are allowed",
            ));
        }
    }
    if config.impl_suffix.ends_with(config.test_suffix.as_str())
        || config.test_suffix.ends_with(config.impl_suffix.as_str())
    {
        return Err(invalid(
            &config.test_suffix,
            &format!("overlaps with `{}`", config.impl_suffix),
        ));
    }
    Ok(())
}
