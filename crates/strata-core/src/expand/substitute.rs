//! `substitute!` expansion
//!
//! A substitution block becomes a test-only module named after the layer:
//!
//! ```text
//! pub mod gateway {
//!     pub use <real>::*;                       // fall-through, glob priority
//!     pub use self::__substitution::save;      // replacement, explicit priority
//!     mod __substitution {
//!         use super::super::*;                 // the test module
//!         use <real>::*;                       // the real layer
//!         pub fn save(..) { .. }
//!         const _: fn(..) = <real>::save;      // signature check
//!     }
//! }
//! ```
//!
//! Explicit re-exports beat glob re-exports in Rust name resolution, so every
//! path through `gateway::` in the test module sees the replacement, and
//! every other name falls through to the real layer.

use super::{ModeGates, check_layer};
use crate::config::StrataConfig;
use crate::naming::Mode;
use crate::paths::{Anchor, is_single_ident, rebase};
use crate::syntax::{SubstituteInput, SubstitutionBlock};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use std::collections::HashSet;
use syn::visit::Visit;
use syn::{FnArg, Ident, Item, ItemFn, Lifetime, Macro, TypeImplTrait, Visibility};
use tracing::debug;

/// Expand a `substitute!` invocation
pub fn expand_substitute(input: TokenStream, config: &StrataConfig) -> syn::Result<TokenStream> {
    let parsed: SubstituteInput = syn::parse2(input)?;

    let mut seen = HashSet::new();
    for block in &parsed.blocks {
        let layer = block.layer();
        if !seen.insert(layer.to_string()) {
            return Err(syn::Error::new(
                layer.span(),
                format!(
                    "layer `{layer}` already has a substitution block here; \
                     open at most one block per layer in a test module"
                ),
            ));
        }
    }

    let span = parsed.blocks[0].layer().span();
    let gates = ModeGates::new(config, span)?;
    let production = gates.gate(Mode::Production);
    let message = format!(
        "`substitute!` replaces layer symbols in test builds only (cfg({}))",
        config.mode.test_cfg
    );

    let mut output = quote! {
        #production
        ::core::compile_error!(#message);
    };
    for block in &parsed.blocks {
        check_layer(block.layer(), config)?;
        reject_nested(block)?;
        output.extend(expand_block(block, &gates)?);
    }
    Ok(output)
}

fn expand_block(block: &SubstitutionBlock, gates: &ModeGates) -> syn::Result<TokenStream> {
    let layer = block.layer();
    let test = gates.gate(Mode::Test);
    let inner = Ident::new("__substitution", Span::call_site());
    let items = &block.items;

    let replacements = replacements(block)?;
    if replacements.is_empty() {
        return Err(syn::Error::new(
            layer.span(),
            format!("substitution block for `{layer}` defines no `pub` replacement"),
        ));
    }
    let reexports = replacements.iter().map(|(name, vis)| {
        quote!(#vis use self::#inner::#name;)
    });

    let fall_through = (!is_single_ident(&block.target)).then(|| {
        let outer = rebase(&block.target, 1, Anchor::Absolute);
        let inner_path = rebase(&block.target, 2, Anchor::Absolute);
        (outer, inner_path)
    });

    let (outer_glob, inner_glob, checks) = match &fall_through {
        Some((outer, inner_path)) => {
            let checks = target_checks(&block.items, inner_path);
            (
                quote!(pub use #outer::*;),
                quote! {
                    #[allow(unused_imports)]
                    use #inner_path::*;
                },
                checks,
            )
        }
        None => (TokenStream::new(), TokenStream::new(), TokenStream::new()),
    };

    debug!(
        layer = %layer,
        replacements = replacements.len(),
        fall_through = fall_through.is_some(),
        "Expanded substitution block"
    );

    Ok(quote! {
        #test
        #[allow(non_snake_case, unused_imports)]
        pub mod #layer {
            #outer_glob
            #(#reexports)*

            #[allow(dead_code)]
            mod #inner {
                #[allow(unused_imports)]
                use super::super::*;
                #inner_glob

                #(#items)*

                #checks
            }
        }
    })
}

/// Named public items of a block, with the visibility to re-export them at
fn replacements(block: &SubstitutionBlock) -> syn::Result<Vec<(Ident, TokenStream)>> {
    let mut found = Vec::new();
    for item in &block.items {
        let Some((name, vis)) = named_item(item) else {
            continue;
        };
        match vis {
            Visibility::Inherited => {}
            Visibility::Public(_) => found.push((name.clone(), quote!(pub))),
            Visibility::Restricted(r) if r.in_token.is_none() && r.path.is_ident("crate") => {
                found.push((name.clone(), quote!(pub(crate))));
            }
            Visibility::Restricted(_) => {
                return Err(syn::Error::new(
                    name.span(),
                    "replacements must be `pub` or `pub(crate)`; private items are helpers",
                ));
            }
        }
    }
    Ok(found)
}

fn named_item(item: &Item) -> Option<(&Ident, &Visibility)> {
    match item {
        Item::Fn(f) => Some((&f.sig.ident, &f.vis)),
        Item::Struct(s) => Some((&s.ident, &s.vis)),
        Item::Enum(e) => Some((&e.ident, &e.vis)),
        Item::Union(u) => Some((&u.ident, &u.vis)),
        Item::Const(c) => Some((&c.ident, &c.vis)),
        Item::Static(s) => Some((&s.ident, &s.vis)),
        Item::Type(t) => Some((&t.ident, &t.vis)),
        Item::Trait(t) => Some((&t.ident, &t.vis)),
        Item::Mod(m) => Some((&m.ident, &m.vis)),
        _ => None,
    }
}

/// Compile-time checks tying replacements to the real layer
///
/// Every public replacement must name an existing symbol of the real layer,
/// and plain free functions must keep the real function's signature.
fn target_checks(items: &[Item], real: &TokenStream) -> TokenStream {
    let mut checks = TokenStream::new();
    for item in items {
        let Some((name, vis)) = named_item(item) else {
            continue;
        };
        if matches!(vis, Visibility::Inherited) || matches!(item, Item::Mod(_)) {
            continue;
        }
        checks.extend(quote! {
            #[allow(unused_imports)]
            use #real::#name as _;
        });
        if let Item::Fn(function) = item {
            if let Some(pointer) = fn_pointer_type(function) {
                checks.extend(quote! {
                    const _: #pointer = #real::#name;
                });
            }
        }
    }
    checks
}

/// Function pointer type of a plain free function, if it has one we can spell
fn fn_pointer_type(function: &ItemFn) -> Option<TokenStream> {
    let sig = &function.sig;
    if !sig.generics.params.is_empty()
        || sig.generics.where_clause.is_some()
        || sig.asyncness.is_some()
        || sig.variadic.is_some()
    {
        return None;
    }

    let mut args = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Typed(typed) => args.push(&typed.ty),
            FnArg::Receiver(_) => return None,
        }
    }

    let mut probe = Unspellable::default();
    for ty in &args {
        probe.visit_type(ty);
    }
    probe.visit_return_type(&sig.output);
    if probe.found {
        return None;
    }

    let unsafety = &sig.unsafety;
    let abi = &sig.abi;
    let output = &sig.output;
    Some(quote!(#unsafety #abi fn(#(#args),*) #output))
}

/// Finds types that cannot appear in a function pointer type
#[derive(Default)]
struct Unspellable {
    found: bool,
}

impl<'ast> Visit<'ast> for Unspellable {
    fn visit_type_impl_trait(&mut self, _: &'ast TypeImplTrait) {
        self.found = true;
    }

    fn visit_lifetime(&mut self, lifetime: &'ast Lifetime) {
        if lifetime.ident == "_" {
            self.found = true;
        }
    }
}

fn reject_nested(block: &SubstitutionBlock) -> syn::Result<()> {
    #[derive(Default)]
    struct Nested(Option<Span>);

    impl<'ast> Visit<'ast> for Nested {
        fn visit_macro(&mut self, mac: &'ast Macro) {
            if self.0.is_none()
                && mac
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "substitute")
            {
                self.0 = Some(mac.path.segments[mac.path.segments.len() - 1].ident.span());
            }
        }
    }

    let mut nested = Nested::default();
    for item in &block.items {
        nested.visit_item(item);
    }
    match nested.0 {
        Some(span) => Err(syn::Error::new(
            span,
            "substitution blocks cannot be nested; one block per layer per test module",
        )),
        None => Ok(()),
    }
}
