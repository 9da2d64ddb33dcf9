//! `weave!` expansion

use super::ModeGates;
use crate::config::StrataConfig;
use crate::naming::Mode;
use crate::syntax::WeaveInput;
use proc_macro2::TokenStream;
use quote::quote;
use std::path::Path;
use tracing::debug;

/// Expand a `weave!` invocation
///
/// Source paths are relative to `manifest_dir` (the compiling crate's
/// `CARGO_MANIFEST_DIR`) and emitted as absolute `#[path]` attributes, so
/// the same invocation works from `src/` test modules and from `tests/`.
pub fn expand_weave(
    input: TokenStream,
    config: &StrataConfig,
    manifest_dir: &Path,
) -> syn::Result<TokenStream> {
    let parsed: WeaveInput = syn::parse2(input)?;
    let Some(first) = parsed.entries.first() else {
        return Ok(TokenStream::new());
    };

    let gates = ModeGates::new(config, first.name.span())?;
    let production = gates.gate(Mode::Production);
    let test = gates.gate(Mode::Test);
    let message = format!(
        "`weave!` compiles unit sources into test builds only (cfg({}))",
        config.mode.test_cfg
    );

    let mut output = quote! {
        #production
        ::core::compile_error!(#message);
    };
    for entry in &parsed.entries {
        let source = manifest_dir.join(entry.source.value());
        if !source.is_file() {
            return Err(syn::Error::new(
                entry.source.span(),
                format!("unit source `{}` not found", source.display()),
            ));
        }
        let path = source.display().to_string();
        let attrs = &entry.attrs;
        let vis = &entry.vis;
        let name = &entry.name;
        debug!(module = %name, source = %path, "Weaving unit source");
        output.extend(quote! {
            #test
            #(#attrs)*
            #[allow(dead_code, unused_imports)]
            #[path = #path]
            #vis mod #name;
        });
    }
    Ok(output)
}
