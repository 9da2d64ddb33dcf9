//! `layers!` expansion

use super::{ModeGates, check_layer, scope_ident};
use crate::config::StrataConfig;
use crate::naming::Mode;
use crate::paths::{Anchor, rebase};
use crate::syntax::{LayerEntry, LayersInput};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use tracing::debug;

/// Expand a `layers!` invocation
///
/// Per layer this emits the two aggregate scopes (only one survives `cfg`)
/// and the alias module that forwards to the active one.
pub fn expand_layers(input: TokenStream, config: &StrataConfig) -> syn::Result<TokenStream> {
    let parsed: LayersInput = syn::parse2(input)?;
    let entries = merge_entries(parsed.entries)?;

    let mut output = TokenStream::new();
    for entry in &entries {
        check_layer(&entry.name, config)?;
        output.extend(expand_entry(entry, config)?);
    }
    Ok(output)
}

/// Fold repeated declarations of one layer into a single entry
///
/// Repeats are idempotent: unit lists are merged without duplicates and
/// identical attributes are kept once. Visibility must agree.
fn merge_entries(entries: Vec<LayerEntry>) -> syn::Result<Vec<LayerEntry>> {
    let mut merged: Vec<LayerEntry> = Vec::new();
    for entry in entries {
        let Some(existing) = merged.iter_mut().find(|e| e.name == entry.name) else {
            merged.push(dedup(entry));
            continue;
        };

        let existing_vis = existing.vis.to_token_stream().to_string();
        if existing_vis != entry.vis.to_token_stream().to_string() {
            return Err(syn::Error::new(
                entry.name.span(),
                format!(
                    "layer `{}` is redeclared with a different visibility",
                    entry.name
                ),
            ));
        }
        debug!(layer = %entry.name, "Merging repeated layer declaration");
        existing.attrs.extend(entry.attrs);
        existing.units.extend(entry.units);
        *existing = dedup(existing.clone());
    }
    Ok(merged)
}

fn dedup(mut entry: LayerEntry) -> LayerEntry {
    let mut seen = std::collections::HashSet::new();
    entry
        .units
        .retain(|unit| seen.insert(unit.to_token_stream().to_string()));
    let mut seen = std::collections::HashSet::new();
    entry
        .attrs
        .retain(|attr| seen.insert(attr.to_token_stream().to_string()));
    entry
}

fn expand_entry(entry: &LayerEntry, config: &StrataConfig) -> syn::Result<TokenStream> {
    let gates = ModeGates::new(config, entry.name.span())?;
    let name = &entry.name;
    let vis = &entry.vis;
    let attrs = &entry.attrs;
    let description = config
        .layers
        .get(&name.to_string())
        .and_then(|layer| layer.description.as_deref())
        .map(|text| quote!(#[doc = #text]));

    let mut scopes = TokenStream::new();
    let mut forwards = TokenStream::new();
    for mode in Mode::ALL {
        let gate = gates.gate(mode);
        let scope = scope_ident(name, mode, config);
        let units = entry.units.iter().map(|unit| {
            let unit = rebase(unit, 1, Anchor::Module);
            quote!(pub use #unit::#scope::*;)
        });
        let doc = format!("The `{name}` layer's {mode} scope: every unit wrapped for `{name}`.");
        scopes.extend(quote! {
            #gate
            #[doc = #doc]
            #[allow(non_snake_case, unused_imports)]
            #vis mod #scope {
                #(#units)*
            }
        });
        forwards.extend(quote! {
            #gate
            pub use super::#scope::*;
        });
    }

    debug!(layer = %name, units = entry.units.len(), "Declared layer");
    Ok(quote! {
        #scopes

        #(#attrs)*
        #description
        #[allow(non_snake_case, unused_imports)]
        #vis mod #name {
            #forwards
        }
    })
}
