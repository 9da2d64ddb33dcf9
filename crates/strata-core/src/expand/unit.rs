//! `unit!` expansion

use super::{ModeGates, check_layer, scope_ident};
use crate::config::StrataConfig;
use crate::naming::Mode;
use crate::syntax::UnitInput;
use proc_macro2::TokenStream;
use quote::quote;
use tracing::debug;

/// Expand a `unit!` invocation
///
/// The items are emitted twice, once per mode scope, each copy behind its
/// mode's `cfg`. Both the invoking module and the scope glob-import their
/// parent, so layer names inside the items resolve from whichever module
/// the unit's source is compiled under.
pub fn expand_unit(input: TokenStream, config: &StrataConfig) -> syn::Result<TokenStream> {
    let UnitInput { layer, items } = syn::parse2(input)?;
    check_layer(&layer, config)?;
    let gates = ModeGates::new(config, layer.span())?;

    let scopes: Vec<TokenStream> = Mode::ALL
        .iter()
        .map(|&mode| {
            let gate = gates.gate(mode);
            let scope = scope_ident(&layer, mode, config);
            quote! {
                #gate
                #[allow(non_snake_case)]
                pub mod #scope {
                    #[allow(unused_imports)]
                    use super::*;

                    #(#items)*
                }
            }
        })
        .collect();

    debug!(layer = %layer, items = items.len(), "Expanded unit");
    Ok(quote! {
        #[allow(unused_imports)]
        use super::*;

        #(#scopes)*
    })
}
