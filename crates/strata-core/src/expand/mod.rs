//! Token generation for the layer macros
//!
//! Each submodule turns one macro's input into the items it stands for.
//! All functions take the already-loaded [`StrataConfig`] so expansions are
//! reproducible in tests.

mod layers;
mod substitute;
mod track;
mod unit;
mod weave;

pub use layers::expand_layers;
pub use substitute::expand_substitute;
pub use track::{MODE_KEYS, mode_env_var, track_inputs};
pub use unit::expand_unit;
pub use weave::expand_weave;

use crate::config::StrataConfig;
use crate::naming::{Mode, scope_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

/// `#[cfg(...)]` attributes selecting each build mode
pub(crate) struct ModeGates {
    production: TokenStream,
    test: TokenStream,
}

impl ModeGates {
    pub(crate) fn new(config: &StrataConfig, span: proc_macro2::Span) -> syn::Result<Self> {
        let predicate = config
            .mode
            .test_predicate()
            .map_err(|e| syn::Error::new(span, e.to_string()))?;
        Ok(Self {
            production: quote!(#[cfg(not(#predicate))]),
            test: quote!(#[cfg(#predicate)]),
        })
    }

    pub(crate) fn gate(&self, mode: Mode) -> &TokenStream {
        match mode {
            Mode::Production => &self.production,
            Mode::Test => &self.test,
        }
    }
}

/// Validate `layer` against the configuration, reporting at its span
pub(crate) fn check_layer(layer: &Ident, config: &StrataConfig) -> syn::Result<()> {
    config
        .check_layer(&layer.to_string())
        .map_err(|e| syn::Error::new(layer.span(), e.to_string()))
}

/// Scope module identifier for `layer` in `mode`, spanned at the layer name
pub(crate) fn scope_ident(layer: &Ident, mode: Mode, config: &StrataConfig) -> Ident {
    format_ident!(
        "{}",
        scope_name(&layer.to_string(), mode, &config.mode),
        span = layer.span()
    )
}

/// Run an expansion, turning parse and check failures into compile errors
pub fn or_compile_error(result: syn::Result<TokenStream>) -> TokenStream {
    result.unwrap_or_else(syn::Error::into_compile_error)
}
