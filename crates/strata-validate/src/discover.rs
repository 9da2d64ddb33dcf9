//! Layer layout discovery
//!
//! Parses a crate's sources and collects what the layer macros declare:
//! `layers!` entries, `unit!` sites with the paths their bodies use, and
//! anything that could not be parsed.

use crate::scan::{for_each_crate_rs_path, module_name};
use crate::{Result, ValidateConfig, ValidationError};
use proc_macro2::{Spacing, TokenStream, TokenTree};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use strata_core::StrataConfig;
use strata_core::syntax::{LayersInput, UnitInput};
use syn::visit::{self, Visit};
use syn::{Item, ItemUse, UseTree};
use tracing::{debug, trace};

/// A path used inside a unit body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedPath {
    /// First segment (`crate`, a layer name, a type...)
    pub first: String,
    /// Segments joined with `::`, generics dropped
    pub text: String,
    pub line: usize,
}

/// One entry of a `layers!` invocation
#[derive(Debug, Clone, Serialize)]
pub struct LayerDeclaration {
    pub layer: String,
    /// Module names of the listed units (last path segment)
    pub units: Vec<String>,
    pub file: PathBuf,
    pub line: usize,
}

/// One `unit!` invocation
#[derive(Debug, Clone, Serialize)]
pub struct UnitSite {
    pub layer: String,
    /// Module the unit expands in; `None` at a crate root
    pub module: Option<String>,
    /// Inline modules between the file and the invocation, joined with `::`
    pub inline_path: String,
    pub file: PathBuf,
    pub line: usize,
    /// Multi-segment and `crate` paths used by the unit's items
    pub paths: Vec<CollectedPath>,
}

/// A file or invocation the parser rejected
#[derive(Debug, Clone, Serialize)]
pub struct Malformed {
    pub file: PathBuf,
    pub line: Option<usize>,
    pub message: String,
}

/// Everything the layer rules need to know about one crate
#[derive(Debug, Clone)]
pub struct CrateLayout {
    pub name: String,
    pub root: PathBuf,
    pub config: StrataConfig,
    pub config_path: Option<PathBuf>,
    pub declarations: Vec<LayerDeclaration>,
    pub units: Vec<UnitSite>,
    pub malformed: Vec<Malformed>,
}

impl CrateLayout {
    /// Load the crate's configuration and parse its sources
    pub fn discover(crate_dir: &Path, config: &ValidateConfig) -> Result<Self> {
        let config_path = StrataConfig::discover(crate_dir);
        let strata = StrataConfig::load_for_manifest_dir(crate_dir)?;
        let mut layout = Self {
            name: crate_name(crate_dir)?,
            root: crate_dir.to_path_buf(),
            config: strata,
            config_path,
            declarations: Vec::new(),
            units: Vec::new(),
            malformed: Vec::new(),
        };

        for_each_crate_rs_path(config, crate_dir, |path, src_dir| {
            layout.scan_file(path, src_dir)
        })?;

        debug!(
            crate_name = %layout.name,
            declarations = layout.declarations.len(),
            units = layout.units.len(),
            malformed = layout.malformed.len(),
            "Discovered layer layout"
        );
        Ok(layout)
    }

    fn scan_file(&mut self, path: &Path, src_dir: &Path) -> Result<()> {
        let source = std::fs::read_to_string(path)?;
        let file = match syn::parse_file(&source) {
            Ok(file) => file,
            Err(e) => {
                self.malformed.push(Malformed {
                    file: path.to_path_buf(),
                    line: Some(e.span().start().line),
                    message: e.to_string(),
                });
                return Ok(());
            }
        };
        trace!(path = %path.display(), "Scanning file");
        self.scan_items(&file.items, path, module_name(path, src_dir), "");
        Ok(())
    }

    fn scan_items(&mut self, items: &[Item], file: &Path, module: Option<String>, inline: &str) {
        for item in items {
            match item {
                Item::Macro(item) => self.scan_macro(&item.mac, file, module.clone(), inline),
                Item::Mod(inner) => {
                    if let Some((_, content)) = &inner.content {
                        let ident = inner.ident.to_string();
                        let nested = if inline.is_empty() {
                            ident.clone()
                        } else {
                            format!("{inline}::{ident}")
                        };
                        self.scan_items(content, file, Some(ident), &nested);
                    }
                }
                _ => {}
            }
        }
    }

    fn scan_macro(&mut self, mac: &syn::Macro, file: &Path, module: Option<String>, inline: &str) {
        let Some(name) = mac.path.segments.last().map(|s| s.ident.to_string()) else {
            return;
        };
        let line = mac.path.segments[0].ident.span().start().line;
        let malformed = |e: syn::Error| Malformed {
            file: file.to_path_buf(),
            line: Some(e.span().start().line),
            message: format!("malformed `{name}!` invocation: {e}"),
        };

        match name.as_str() {
            "layers" => match syn::parse2::<LayersInput>(mac.tokens.clone()) {
                Ok(input) => {
                    for entry in input.entries {
                        self.declarations.push(LayerDeclaration {
                            layer: entry.name.to_string(),
                            units: entry
                                .units
                                .iter()
                                .filter_map(|unit| unit.segments.last())
                                .map(|segment| segment.ident.to_string())
                                .collect(),
                            file: file.to_path_buf(),
                            line: entry.name.span().start().line,
                        });
                    }
                }
                Err(e) => self.malformed.push(malformed(e)),
            },
            "unit" => match syn::parse2::<UnitInput>(mac.tokens.clone()) {
                Ok(input) => {
                    let mut collector = PathCollector::default();
                    for item in &input.items {
                        collector.visit_item(item);
                    }
                    self.units.push(UnitSite {
                        layer: input.layer.to_string(),
                        module,
                        inline_path: inline.to_string(),
                        file: file.to_path_buf(),
                        line,
                        paths: collector.paths,
                    });
                }
                Err(e) => self.malformed.push(malformed(e)),
            },
            _ => {}
        }
    }

    /// Layers named by a `layers!` entry anywhere in the crate
    pub fn declared_layers(&self) -> BTreeSet<String> {
        self.declarations.iter().map(|d| d.layer.clone()).collect()
    }

    /// Layer names units may use: the registry if there is one, else the
    /// declared layers
    pub fn known_layers(&self) -> BTreeSet<String> {
        if self.config.has_registry() {
            self.config.layers.keys().cloned().collect()
        } else {
            self.declared_layers()
        }
    }

    /// Unit module names listed for `layer` across all declarations
    pub fn units_listed_for(&self, layer: &str) -> BTreeSet<String> {
        self.declarations
            .iter()
            .filter(|d| d.layer == layer)
            .flat_map(|d| d.units.iter().cloned())
            .collect()
    }

    /// Declared layers with their listed units
    pub fn layer_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.declared_layers()
            .into_iter()
            .map(|layer| {
                let units = self.units_listed_for(&layer);
                (layer, units)
            })
            .collect()
    }
}

fn crate_name(crate_dir: &Path) -> Result<String> {
    let fallback = || {
        crate_dir
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    };
    let manifest = crate_dir.join("Cargo.toml");
    let Ok(text) = std::fs::read_to_string(&manifest) else {
        return Ok(fallback());
    };
    let table: toml::Table = toml::from_str(&text).map_err(|e| ValidationError::Parse {
        file: manifest.clone(),
        message: e.to_string(),
    })?;
    Ok(table
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map_or_else(fallback, str::to_string))
}

/// Collects the paths a unit body uses
#[derive(Default)]
struct PathCollector {
    paths: Vec<CollectedPath>,
}

impl PathCollector {
    fn record(&mut self, first: &syn::Ident, text: String) {
        self.paths.push(CollectedPath {
            first: first.to_string(),
            text,
            line: first.span().start().line,
        });
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        if path.leading_colon.is_none() {
            if let Some(first) = path.segments.first() {
                if path.segments.len() > 1 || first.ident == "crate" {
                    let text = path
                        .segments
                        .iter()
                        .map(|s| s.ident.to_string())
                        .collect::<Vec<_>>()
                        .join("::");
                    self.record(&first.ident, text);
                }
            }
        }
        visit::visit_path(self, path);
    }

    fn visit_item_use(&mut self, item: &'ast ItemUse) {
        if item.leading_colon.is_none() {
            self.record_use(&item.tree);
        }
    }

    fn visit_macro(&mut self, mac: &'ast syn::Macro) {
        visit::visit_macro(self, mac);
        self.scan_tokens(mac.tokens.clone());
    }
}

impl PathCollector {
    /// `use a::b` is a reference to `a`; `use {a::b, c::d}` to both
    fn record_use(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => self.record(&path.ident, use_tree_text(tree)),
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.record_use(tree);
                }
            }
            UseTree::Name(_) | UseTree::Rename(_) | UseTree::Glob(_) => {}
        }
    }

    /// Paths inside a macro body, which `syn` keeps as raw tokens
    fn scan_tokens(&mut self, tokens: TokenStream) {
        let tokens: Vec<TokenTree> = tokens.into_iter().collect();
        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                TokenTree::Group(group) => {
                    self.scan_tokens(group.stream());
                    i += 1;
                }
                TokenTree::Ident(first) if !continues_path(&tokens, i) => {
                    let mut segments = vec![first.to_string()];
                    let mut next = i + 1;
                    while is_path_sep(&tokens, next) {
                        let Some(TokenTree::Ident(segment)) = tokens.get(next + 2) else {
                            break;
                        };
                        segments.push(segment.to_string());
                        next += 3;
                    }
                    if segments.len() > 1 || first == "crate" {
                        self.record(first, segments.join("::"));
                    }
                    i = next.max(i + 1);
                }
                _ => i += 1,
            }
        }
    }
}

/// `::` starts at `at`
fn is_path_sep(tokens: &[TokenTree], at: usize) -> bool {
    matches!(
        (tokens.get(at), tokens.get(at + 1)),
        (Some(TokenTree::Punct(a)), Some(TokenTree::Punct(b)))
            if a.as_char() == ':' && a.spacing() == Spacing::Joint && b.as_char() == ':'
    )
}

/// The ident at `at` follows `::` or `$`, so it does not start a path
fn continues_path(tokens: &[TokenTree], at: usize) -> bool {
    let after_dollar = at
        .checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|prev| matches!(prev, TokenTree::Punct(p) if p.as_char() == '$'));
    after_dollar || (at >= 2 && is_path_sep(tokens, at - 2))
}

fn use_tree_text(tree: &UseTree) -> String {
    match tree {
        UseTree::Path(path) => format!("{}::{}", path.ident, use_tree_text(&path.tree)),
        UseTree::Name(name) => name.ident.to_string(),
        UseTree::Rename(rename) => format!("{} as {}", rename.ident, rename.rename),
        UseTree::Glob(_) => "*".to_string(),
        UseTree::Group(_) => "{..}".to_string(),
    }
}
