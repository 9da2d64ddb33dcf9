//! Build inputs of an expansion
//!
//! Cargo only rebuilds a crate when one of its recorded inputs changes. The
//! configuration a macro reads is invisible to it, so every expansion also
//! emits anonymous constants that pull the same inputs through
//! `include_bytes!` and `option_env!`, which rustc records as dependencies.

use crate::config::ENV_PREFIX;
use proc_macro2::TokenStream;
use quote::quote;
use std::path::Path;
use syn::LitStr;

/// `[mode]` keys that can be overridden from the environment
pub const MODE_KEYS: [&str; 3] = ["test_cfg", "impl_suffix", "test_suffix"];

/// Environment variable overriding `mode.<key>`
pub fn mode_env_var(key: &str) -> String {
    format!("{ENV_PREFIX}_MODE__{}", key.to_uppercase())
}

/// Items registering `config_path` and the mode variables with the build
pub fn track_inputs(config_path: Option<&Path>) -> TokenStream {
    let file = config_path
        .map(|path| std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
        .and_then(|path| path.to_str().map(|p| LitStr::new(p, proc_macro2::Span::call_site())))
        .map(|path| quote!(const _: &[u8] = ::core::include_bytes!(#path);));
    let vars = MODE_KEYS.iter().map(|key| {
        let var = mode_env_var(key);
        quote!(const _: ::core::option::Option<&str> = ::core::option_env!(#var);)
    });
    quote! {
        #file
        #(#vars)*
    }
}
