//! # strata
//!
//! Compile-time architectural layers with build-time test substitution.
//!
//! A codebase is split into named layers (say `entity`, `gateway`,
//! `interactor`). Code refers to a layer by its plain name and the compiler
//! resolves that name to the layer's production scope or, in a test build, to
//! its test scope. A test can replace chosen symbols of one layer and compile
//! the real source of another unit against the replacement, without trait
//! objects, injected function pointers or any change to the production build.
//!
//! ## Features
//!
//! - **Layer aliases**: `gateway::store_to_file` resolves to
//!   `gateway_impl::store_to_file` or `gateway_test::store_to_file`
//! - **Units**: any number of source files contribute items to one layer
//! - **Substitution**: a test module shadows chosen layer symbols, every other
//!   symbol falls through to the real layer
//! - **Weaving**: a unit's real source compiles inside the test module and
//!   sees the substitution
//! - **Registry**: an optional `strata.toml` lists the layers and their allowed
//!   dependencies, checked by the macros and by `strata-validate`
//!
//! ## Example
//!
//! ```ignore
//! // src/lib.rs
//! strata::layers! {
//!     pub entity: note;
//!     pub gateway: file_store;
//!     pub interactor: add_entity;
//! }
//! mod note;
//! mod file_store;
//! mod add_entity;
//!
//! // src/add_entity.rs
//! strata::unit! {
//!     interactor;
//!     pub fn add_new_entity(note: &entity::Note) -> Result<(), gateway::GatewayError> {
//!         gateway::store_to_file(std::path::Path::new("notes.jsonl"), note)
//!     }
//! }
//!
//! // tests/add_entity.rs
//! use my_app::{entity, interactor};
//!
//! strata::substitute! {
//!     my_app::gateway {
//!         pub fn store_to_file(_: &Path, _: &entity::Note) -> Result<(), GatewayError> {
//!             Ok(())
//!         }
//!     }
//! }
//! strata::weave! { mod add_entity = "src/add_entity.rs"; }
//! ```
//!
//! ## Rules for unit sources
//!
//! - refer to other layers by plain name (`gateway::Thing`), never through
//!   `crate::` paths, so a woven copy resolves them from the test module
//! - invoke `unit!` in a module file, never at a crate root

pub use strata_macros::{layers, substitute, unit, weave};

/// Scope name derivation shared by every compilation
///
/// Re-exports from the core crate for tooling that needs to know where a
/// layer's items live.
pub mod naming {
    pub use strata_core::naming::*;
}

/// `strata.toml` model and loader
///
/// Re-exports from the core crate for convenience
pub mod config {
    pub use strata_core::config::*;
}

pub use config::{LayerConfig, ModeConfig, StrataConfig};
pub use naming::{Mode, scope_name, validate_layer_name};
pub use strata_core::{Error, Result};
