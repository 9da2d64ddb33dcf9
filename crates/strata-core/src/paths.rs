//! Path rebasing for generated modules
//!
//! Users write paths relative to the module that invokes a macro, but the
//! generated code references them from inside nested modules. A path is
//! rebased by `depth` levels:
//!
//! | Written | depth = 1 | depth = 2 |
//! |---------|-----------|-----------|
//! | `note` | `super::note` | `super::super::note` |
//! | `self::note` | `super::note` | `super::super::note` |
//! | `super::note` | `super::super::note` | `super::super::super::note` |
//! | `crate::note`, `::dep::note` | unchanged | unchanged |

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Path;

/// How a path's first segment should be treated when it is rebased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Path is relative to the invoking module
    Module,
    /// Path is an external crate or otherwise resolvable from anywhere
    Absolute,
}

/// Rebase `path` so it resolves the same way from `depth` modules deeper
pub fn rebase(path: &Path, depth: usize, plain: Anchor) -> TokenStream {
    let first = path.segments.first().map(|s| s.ident.to_string());
    let keep = path.leading_colon.is_some()
        || first.as_deref() == Some("crate")
        || (plain == Anchor::Absolute && !matches!(first.as_deref(), Some("self" | "super")));
    if keep {
        return quote!(#path);
    }

    let mut tokens = TokenStream::new();
    for _ in 0..depth {
        tokens.extend(quote!(super::));
    }
    let skip = usize::from(first.as_deref() == Some("self"));
    for (i, segment) in path.segments.iter().skip(skip).enumerate() {
        if i > 0 {
            tokens.extend(quote!(::));
        }
        segment.to_tokens(&mut tokens);
    }
    tokens
}

/// True if `path` addresses a single local name with no module prefix
pub fn is_single_ident(path: &Path) -> bool {
    path.leading_colon.is_none() && path.segments.len() == 1
}
