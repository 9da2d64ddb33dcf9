//! # strata-core
//!
//! Engine behind the `strata` layer macros.
//!
//! Everything the procedural macros do lives here as ordinary functions over
//! [`proc_macro2::TokenStream`], so the expansion rules can be tested without
//! a compiler in the loop:
//!
//! - [`naming`] - the `(layer, mode) -> scope` derivation shared by every
//!   compilation that has to agree on where a layer's items live
//! - [`config`] - `strata.toml` discovery and loading (mode switch, suffixes,
//!   layer registry)
//! - [`syntax`] - input grammars of `layers!`, `unit!`, `substitute!` and
//!   `weave!`
//! - [`expand`] - token generation for each macro
//!
//! ## Build modes
//!
//! | Mode | Selected by | Alias resolves to |
//! |------|-------------|-------------------|
//! | Production | `cfg(not(<test_cfg>))` | `<layer>_impl` |
//! | Test | `cfg(<test_cfg>)` (default `test`) | `<layer>_test` |

pub mod config;
pub mod error;
pub mod expand;
pub mod naming;
pub mod paths;
pub mod syntax;

pub use config::{CONFIG_FILENAME, ENV_PREFIX, LayerConfig, ModeConfig, StrataConfig};
pub use error::{Error, Result};
pub use naming::{Mode, scope_name, validate_layer_name};
