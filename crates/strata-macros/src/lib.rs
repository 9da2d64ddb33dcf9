//! Procedural macro entry points for `strata`.
//!
//! Use these through the `strata` facade crate. Each macro loads the
//! compiling crate's `strata.toml` (if any) and delegates to
//! [`strata_core::expand`].

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use std::path::PathBuf;
use strata_core::StrataConfig;
use strata_core::config::ConfigLoader;
use strata_core::expand::{self, or_compile_error};

/// Directory of the crate whose code is being expanded
fn manifest_dir() -> PathBuf {
    std::env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Load the configuration, reporting failures at the macro call site
///
/// Also returns the items that make cargo rebuild when `strata.toml` or a
/// `STRATA_MODE__*` variable changes.
fn load_config() -> (TokenStream2, syn::Result<StrataConfig>) {
    let loader = ConfigLoader::for_manifest_dir(&manifest_dir());
    let tracked = expand::track_inputs(loader.config_path());
    let config = loader
        .load()
        .map_err(|e| syn::Error::new(proc_macro2::Span::call_site(), e.to_string()));
    (tracked, config)
}

fn run(
    input: TokenStream,
    f: impl FnOnce(TokenStream2, &StrataConfig) -> syn::Result<TokenStream2>,
) -> TokenStream {
    let (mut output, config) = load_config();
    let expanded = config.and_then(|config| f(input.into(), &config));
    output.extend(or_compile_error(expanded));
    output.into()
}

/// Declare layers and their forwarding aliases
///
/// ```ignore
/// strata::layers! {
///     /// Most abstract and self-contained objects.
///     pub entity: note;
///     pub gateway: codec, file_store;
/// }
/// ```
#[proc_macro]
pub fn layers(input: TokenStream) -> TokenStream {
    run(input, expand::expand_layers)
}

/// Place items inside a layer's scope for the current build mode
///
/// A module wraps a given layer at most once: a second `unit!` for the same
/// layer in the same module defines its scope module twice. Split the items
/// across modules, or merge them into one block.
///
/// ```ignore
/// strata::unit! {
///     gateway;
///     pub fn store_to_file(path: &Path, note: &entity::Note) -> Result<(), GatewayError> { .. }
/// }
/// ```
#[proc_macro]
pub fn unit(input: TokenStream) -> TokenStream {
    run(input, expand::expand_unit)
}

/// Replace chosen symbols of a layer inside a test module
///
/// ```ignore
/// strata::substitute! {
///     my_app::gateway {
///         pub fn store_to_file(path: &Path, note: &Note) -> Result<(), GatewayError> { .. }
///     }
/// }
/// ```
#[proc_macro]
pub fn substitute(input: TokenStream) -> TokenStream {
    run(input, expand::expand_substitute)
}

/// Compile a real unit source file inside a test module
///
/// ```ignore
/// strata::weave! { mod add_entity = "src/add_entity.rs"; }
/// ```
#[proc_macro]
pub fn weave(input: TokenStream) -> TokenStream {
    let dir = manifest_dir();
    run(input, |tokens, config| {
        expand::expand_weave(tokens, config, &dir)
    })
}
