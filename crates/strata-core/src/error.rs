//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration or validating layer names
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be extracted from its sources
    #[error("Configuration error in {origin}: {source}")]
    Config {
        /// Config file that was merged, or `<defaults>`
        origin: String,
        /// The underlying figment error
        #[source]
        source: Box<figment::Error>,
    },

    /// A scope suffix is empty, malformed or clashes with the other suffix
    #[error("Invalid scope suffix `{suffix}`: {reason}")]
    InvalidSuffix {
        /// The offending suffix
        suffix: String,
        /// Why it was rejected
        reason: String,
    },

    /// A layer name cannot be used to derive scope names
    #[error("Invalid layer name `{name}`: {reason}")]
    InvalidLayerName {
        /// The offending name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A layer is not part of the configured registry
    #[error("Unknown layer `{name}`; layers declared in strata.toml: {}", .known.join(", "))]
    UnknownLayer {
        /// The layer that was referenced
        name: String,
        /// Layers the registry knows about
        known: Vec<String>,
    },

    /// A `depends_on` entry names a layer that is not configured
    #[error("Layer `{layer}` depends on unknown layer `{dependency}`")]
    UnknownDependency {
        /// Layer carrying the dependency list
        layer: String,
        /// The missing dependency
        dependency: String,
    },

    /// `mode.test_cfg` is not a valid cfg predicate
    #[error("Invalid test cfg predicate `{predicate}`: {message}")]
    InvalidTestCfg {
        /// The configured predicate
        predicate: String,
        /// Parser message
        message: String,
    },
}
