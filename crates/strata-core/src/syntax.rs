//! Input grammars of the layer macros
//!
//! ```text
//! layers!     { (#[attr])* vis NAME (: PATH (, PATH)*)? ; ... }
//! unit!       { NAME ; ITEM* }
//! substitute! { PATH { ITEM* } ... }
//! weave!      { (#[attr])* vis mod NAME = "relative/path.rs" ; ... }
//! ```

use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, Item, LitStr, Path, Token, Visibility, braced};

/// One entry of a `layers!` block
#[derive(Clone)]
pub struct LayerEntry {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    /// Unit module paths, relative to the declaring module
    pub units: Vec<Path>,
}

impl Parse for LayerEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let name: Ident = input.parse()?;
        let mut units = Vec::new();
        if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            loop {
                units.push(input.call(Path::parse_mod_style)?);
                if input.peek(Token![,]) {
                    input.parse::<Token![,]>()?;
                    // Allow a trailing comma before `;`
                    if input.peek(Token![;]) {
                        break;
                    }
                } else {
                    break;
                }
            }
        }
        input.parse::<Token![;]>()?;
        Ok(Self {
            attrs,
            vis,
            name,
            units,
        })
    }
}

/// Input of `layers!`
pub struct LayersInput {
    pub entries: Vec<LayerEntry>,
}

impl Parse for LayersInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut entries = Vec::new();
        while !input.is_empty() {
            entries.push(input.parse()?);
        }
        Ok(Self { entries })
    }
}

/// Input of `unit!`
pub struct UnitInput {
    pub layer: Ident,
    pub items: Vec<Item>,
}

impl Parse for UnitInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let layer: Ident = input.parse()?;
        input.parse::<Token![;]>()?;
        let items = parse_items(input)?;
        Ok(Self { layer, items })
    }
}

/// One `PATH { ITEM* }` block of `substitute!`
pub struct SubstitutionBlock {
    /// Real layer; its last segment names the layer
    pub target: Path,
    pub items: Vec<Item>,
}

impl SubstitutionBlock {
    /// Layer named by the block
    pub fn layer(&self) -> &Ident {
        // Path::parse_mod_style guarantees at least one segment
        &self.target.segments[self.target.segments.len() - 1].ident
    }
}

impl Parse for SubstitutionBlock {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let target = input.call(Path::parse_mod_style)?;
        let content;
        braced!(content in input);
        let items = parse_items(&content)?;
        Ok(Self { target, items })
    }
}

/// Input of `substitute!`
pub struct SubstituteInput {
    pub blocks: Vec<SubstitutionBlock>,
}

impl Parse for SubstituteInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut blocks = Vec::new();
        while !input.is_empty() {
            blocks.push(input.parse()?);
        }
        if blocks.is_empty() {
            return Err(input.error("expected at least one `layer { ... }` substitution block"));
        }
        Ok(Self { blocks })
    }
}

/// One `mod NAME = "path";` entry of `weave!`
pub struct WeaveEntry {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub source: LitStr,
}

impl Parse for WeaveEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![mod]>()?;
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let source: LitStr = input.parse()?;
        input.parse::<Token![;]>()?;
        Ok(Self {
            attrs,
            vis,
            name,
            source,
        })
    }
}

/// Input of `weave!`
pub struct WeaveInput {
    pub entries: Vec<WeaveEntry>,
}

impl Parse for WeaveInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut entries = Vec::new();
        while !input.is_empty() {
            entries.push(input.parse()?);
        }
        Ok(Self { entries })
    }
}

fn parse_items(input: ParseStream) -> syn::Result<Vec<Item>> {
    let mut items = Vec::new();
    while !input.is_empty() {
        items.push(input.parse()?);
    }
    Ok(items)
}
