//! Configuration loader
//!
//! Loads `strata.toml` for the crate being compiled. Sources are merged in
//! this order (later sources override earlier):
//! 1. Default values from `StrataConfig::default()`
//! 2. The discovered `strata.toml` (if any)
//! 3. Environment variables prefixed `STRATA_`, nested with `__`
//!    (e.g. `STRATA_MODE__TEST_CFG`)
//!
//! # Example Configuration
//!
//! ```toml
//! [mode]
//! test_cfg = "any(test, feature = \"mocks\")"
//!
//! [layers.entity]
//! description = "Most abstract and self-contained objects"
//!
//! [layers.gateway]
//! description = "Serialization to and from storage"
//! depends_on = ["entity"]
//! ```

use crate::error::{Error, Result};
use crate::naming::{validate_layer_name, validate_suffixes};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name looked up next to `Cargo.toml`
pub const CONFIG_FILENAME: &str = "strata.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "STRATA";

/// Build-mode switch and scope suffixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// cfg predicate that selects test mode
    pub test_cfg: String,
    /// Suffix of the production scope
    pub impl_suffix: String,
    /// Suffix of the test scope
    pub test_suffix: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            test_cfg: "test".to_string(),
            impl_suffix: "_impl".to_string(),
            test_suffix: "_test".to_string(),
        }
    }
}

impl ModeConfig {
    /// Parse `test_cfg` into a cfg meta item
    pub fn test_predicate(&self) -> Result<syn::Meta> {
        syn::parse_str(&self.test_cfg).map_err(|e| Error::InvalidTestCfg {
            predicate: self.test_cfg.clone(),
            message: e.to_string(),
        })
    }
}

/// Per-layer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// What kind of code should inhabit the layer
    pub description: Option<String>,
    /// Layers this layer's units may reference
    pub depends_on: Vec<String>,
}

/// Root configuration loaded from `strata.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Build-mode switch and suffixes
    pub mode: ModeConfig,
    /// Layer registry; empty means "any valid layer name"
    pub layers: BTreeMap<String, LayerConfig>,
}

impl StrataConfig {
    /// Find `strata.toml` starting at `start` and walking up
    ///
    /// The search stops after the first directory whose `Cargo.toml`
    /// declares a `[workspace]`, so a stray file above the workspace is
    /// never picked up.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            trace!(path = %candidate.display(), "Looking for strata config");
            if candidate.is_file() {
                return Some(candidate);
            }
            let manifest = dir.join("Cargo.toml");
            if std::fs::read_to_string(&manifest).is_ok_and(|m| m.contains("[workspace]")) {
                break;
            }
        }
        None
    }

    /// Discover and load the configuration for a crate directory
    pub fn load_for_manifest_dir(manifest_dir: &Path) -> Result<Self> {
        ConfigLoader::for_manifest_dir(manifest_dir).load()
    }

    /// Whether `[layers]` restricts the set of layer names
    pub fn has_registry(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Names of all configured layers, sorted
    pub fn layer_names(&self) -> Vec<String> {
        self.layers.keys().cloned().collect()
    }

    /// Check that `name` may be used as a layer in this configuration
    pub fn check_layer(&self, name: &str) -> Result<()> {
        validate_layer_name(name, &self.mode)?;
        if self.has_registry() && !self.layers.contains_key(name) {
            return Err(Error::UnknownLayer {
                name: name.to_string(),
                known: self.layer_names(),
            });
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_suffixes(&self.mode)?;
        self.mode.test_predicate()?;
        for (name, layer) in &self.layers {
            validate_layer_name(name, &self.mode)?;
            for dependency in &layer.depends_on {
                if !self.layers.contains_key(dependency) {
                    return Err(Error::UnknownDependency {
                        layer: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Loader for the `strata.toml` discovered from a crate directory
    pub fn for_manifest_dir(manifest_dir: &Path) -> Self {
        match StrataConfig::discover(manifest_dir) {
            Some(path) => Self::new().with_config_path(path),
            None => Self::new(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<StrataConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(StrataConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                debug!(path = %config_path.display(), "Merging strata config file");
                figment = figment.merge(Toml::file(config_path));
            } else {
                debug!(path = %config_path.display(), "Strata config file not found");
            }
        }

        // Nested keys use a double underscore: STRATA_MODE__TEST_CFG
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let config: StrataConfig = figment.extract().map_err(|e| Error::Config {
            origin: self
                .config_path
                .as_ref()
                .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string()),
            source: Box::new(e),
        })?;

        config.validate()?;
        debug!(
            layers = config.layers.len(),
            test_cfg = %config.mode.test_cfg,
            "Strata configuration loaded"
        );
        Ok(config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
