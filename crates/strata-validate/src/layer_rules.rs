//! Layer Rule Validation
//!
//! Checks a discovered [`CrateLayout`] against its layer registry:
//! unit membership, references between layers, weaving hazards and the
//! shape of the `depends_on` graph.

use crate::discover::CrateLayout;
use crate::violation_trait::{Severity, Violation, ViolationCategory};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use strata_core::StrataConfig;

/// Layer rule violations
#[derive(Debug, Clone, Serialize)]
pub enum UnitViolation {
    UnknownLayer {
        layer: String,
        known: Vec<String>,
        file: PathBuf,
        line: usize,
    },
    ForbiddenReference {
        layer: String,
        target: String,
        path: String,
        file: PathBuf,
        line: usize,
    },
    CratePath {
        layer: String,
        path: String,
        file: PathBuf,
        line: usize,
    },
    UnlistedUnit {
        layer: String,
        module: String,
        file: PathBuf,
        line: usize,
    },
    DependencyCycle {
        cycle: Vec<String>,
        file: Option<PathBuf>,
    },
    Malformed {
        message: String,
        file: PathBuf,
        line: Option<usize>,
    },
}

impl std::fmt::Display for UnitViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLayer {
                layer,
                known,
                file,
                line,
            } => write!(
                f,
                "Unit of unknown layer `{}` (known: {}) at {}:{}",
                layer,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                },
                file.display(),
                line
            ),
            Self::ForbiddenReference {
                layer,
                target,
                path,
                file,
                line,
            } => write!(
                f,
                "Unit of `{}` references layer `{}` ({}) outside its depends_on at {}:{}",
                layer,
                target,
                path,
                file.display(),
                line
            ),
            Self::CratePath {
                layer,
                path,
                file,
                line,
            } => write!(
                f,
                "Unit of `{}` uses crate path {} at {}:{}",
                layer,
                path,
                file.display(),
                line
            ),
            Self::UnlistedUnit {
                layer,
                module,
                file,
                line,
            } => write!(
                f,
                "Unit module `{}` is not listed for layer `{}` at {}:{}",
                module,
                layer,
                file.display(),
                line
            ),
            Self::DependencyCycle { cycle, file } => {
                write!(f, "Layer dependency cycle: {}", cycle.join(" -> "))?;
                if let Some(file) = file {
                    write!(f, " in {}", file.display())?;
                }
                Ok(())
            }
            Self::Malformed {
                message,
                file,
                line,
            } => match line {
                Some(line) => write!(f, "{} at {}:{}", message, file.display(), line),
                None => write!(f, "{} in {}", message, file.display()),
            },
        }
    }
}

impl Violation for UnitViolation {
    fn id(&self) -> &str {
        match self {
            Self::UnknownLayer { .. } => "STRATA001",
            Self::ForbiddenReference { .. } => "STRATA002",
            Self::CratePath { .. } => "STRATA003",
            Self::UnlistedUnit { .. } => "STRATA004",
            Self::DependencyCycle { .. } => "STRATA005",
            Self::Malformed { .. } => "STRATA006",
        }
    }

    fn category(&self) -> ViolationCategory {
        match self {
            Self::UnknownLayer { .. }
            | Self::ForbiddenReference { .. }
            | Self::UnlistedUnit { .. } => ViolationCategory::Layering,
            Self::CratePath { .. } => ViolationCategory::Weaving,
            Self::DependencyCycle { .. } => ViolationCategory::Registry,
            Self::Malformed { .. } => ViolationCategory::Syntax,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::UnlistedUnit { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn file(&self) -> Option<&PathBuf> {
        match self {
            Self::UnknownLayer { file, .. }
            | Self::ForbiddenReference { file, .. }
            | Self::CratePath { file, .. }
            | Self::UnlistedUnit { file, .. }
            | Self::Malformed { file, .. } => Some(file),
            Self::DependencyCycle { file, .. } => file.as_ref(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownLayer { layer, .. } => Some(format!(
                "Declare `{layer}` in `layers!` or add `[layers.{layer}]` to strata.toml"
            )),
            Self::ForbiddenReference { layer, target, .. } => Some(format!(
                "Add \"{target}\" to `depends_on` of `[layers.{layer}]` or move the code"
            )),
            Self::CratePath { .. } => Some(
                "Refer to other layers by plain name so a woven copy sees substitutions"
                    .to_string(),
            ),
            Self::UnlistedUnit { layer, module, .. } => {
                Some(format!("Add `{module}` to the `{layer}` entry of `layers!`"))
            }
            Self::DependencyCycle { .. } => {
                Some("Remove one `depends_on` edge of the cycle".to_string())
            }
            Self::Malformed { .. } => None,
        }
    }
}

/// Layer rules for one crate
pub struct LayerRules<'a> {
    layout: &'a CrateLayout,
}

impl<'a> LayerRules<'a> {
    pub fn new(layout: &'a CrateLayout) -> Self {
        Self { layout }
    }

    /// Run every rule
    pub fn check(&self) -> Vec<UnitViolation> {
        let mut violations = self.check_syntax();
        violations.extend(self.check_cycles());
        violations.extend(self.check_membership());
        violations.extend(self.check_references());
        violations.extend(self.check_listing());
        violations
    }

    /// STRATA006: parse failures, malformed invocations, units at a crate
    /// root and a layer wrapped twice in one module
    pub fn check_syntax(&self) -> Vec<UnitViolation> {
        let mut violations: Vec<UnitViolation> = self
            .layout
            .malformed
            .iter()
            .map(|m| UnitViolation::Malformed {
                message: m.message.clone(),
                file: m.file.clone(),
                line: m.line,
            })
            .collect();
        violations.extend(
            self.layout
                .units
                .iter()
                .filter(|unit| unit.module.is_none())
                .map(|unit| UnitViolation::Malformed {
                    message: format!(
                        "`unit!` for `{}` is invoked at a crate root; move it into a module",
                        unit.layer
                    ),
                    file: unit.file.clone(),
                    line: Some(unit.line),
                }),
        );

        let mut seen = BTreeSet::new();
        for unit in &self.layout.units {
            if !seen.insert((&unit.file, &unit.inline_path, &unit.layer)) {
                violations.push(UnitViolation::Malformed {
                    message: format!(
                        "second `unit!` for `{}` in the same module; merge the blocks",
                        unit.layer
                    ),
                    file: unit.file.clone(),
                    line: Some(unit.line),
                });
            }
        }
        violations
    }

    /// STRATA005: cycles in the configured `depends_on` graph
    pub fn check_cycles(&self) -> Vec<UnitViolation> {
        find_cycle(&self.layout.config)
            .map(|cycle| UnitViolation::DependencyCycle {
                cycle,
                file: self.layout.config_path.clone(),
            })
            .into_iter()
            .collect()
    }

    /// STRATA001: every unit names a known layer
    pub fn check_membership(&self) -> Vec<UnitViolation> {
        let known = self.layout.known_layers();
        self.layout
            .units
            .iter()
            .filter(|unit| !known.contains(&unit.layer))
            .map(|unit| UnitViolation::UnknownLayer {
                layer: unit.layer.clone(),
                known: known.iter().cloned().collect(),
                file: unit.file.clone(),
                line: unit.line,
            })
            .collect()
    }

    /// STRATA002 and STRATA003: what a unit body refers to
    pub fn check_references(&self) -> Vec<UnitViolation> {
        let known = self.layout.known_layers();
        let mut violations = Vec::new();

        for unit in &self.layout.units {
            let allowed = self.layout.config.layers.get(&unit.layer);
            for path in &unit.paths {
                if path.first == "crate" {
                    violations.push(UnitViolation::CratePath {
                        layer: unit.layer.clone(),
                        path: path.text.clone(),
                        file: unit.file.clone(),
                        line: path.line,
                    });
                    continue;
                }
                let Some(layer) = allowed else {
                    continue;
                };
                if path.first != unit.layer
                    && known.contains(&path.first)
                    && !layer.depends_on.contains(&path.first)
                {
                    violations.push(UnitViolation::ForbiddenReference {
                        layer: unit.layer.clone(),
                        target: path.first.clone(),
                        path: path.text.clone(),
                        file: unit.file.clone(),
                        line: path.line,
                    });
                }
            }
        }
        violations
    }

    /// STRATA004: every unit module is listed for its layer
    pub fn check_listing(&self) -> Vec<UnitViolation> {
        self.layout
            .units
            .iter()
            .filter_map(|unit| {
                let module = unit.module.as_ref()?;
                (!self.layout.units_listed_for(&unit.layer).contains(module)).then(|| {
                    UnitViolation::UnlistedUnit {
                        layer: unit.layer.clone(),
                        module: module.clone(),
                        file: unit.file.clone(),
                        line: unit.line,
                    }
                })
            })
            .collect()
    }
}

/// First cycle in the `depends_on` graph, as a path that ends where it starts
pub fn find_cycle(config: &StrataConfig) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        OnStack,
        Done,
    }

    fn visit(
        layer: &str,
        config: &StrataConfig,
        marks: &mut BTreeMap<String, Mark>,
        stack: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        match marks.get(layer) {
            Some(Mark::Done) => return None,
            Some(Mark::OnStack) => {
                let start = stack.iter().position(|l| l == layer).unwrap_or(0);
                let mut cycle = stack[start..].to_vec();
                cycle.push(layer.to_string());
                return Some(cycle);
            }
            None => {}
        }

        marks.insert(layer.to_string(), Mark::OnStack);
        stack.push(layer.to_string());
        if let Some(settings) = config.layers.get(layer) {
            for dependency in &settings.depends_on {
                if let Some(cycle) = visit(dependency, config, marks, stack) {
                    return Some(cycle);
                }
            }
        }
        stack.pop();
        marks.insert(layer.to_string(), Mark::Done);
        None
    }

    let mut marks = BTreeMap::new();
    let mut stack = Vec::new();
    config
        .layers
        .keys()
        .find_map(|layer| visit(layer, config, &mut marks, &mut stack))
}
