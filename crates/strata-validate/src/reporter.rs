//! Validation Report Generation
//!
//! Generates reports in two formats:
//! - JSON for CI integration
//! - Human-readable for terminal output

use crate::discover::CrateLayout;
use crate::{Result, Severity, UnitViolation, Violation, ViolationCategory};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Validation report containing all violations
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Timestamp of the validation run (RFC 3339)
    pub timestamp: String,
    /// Workspace root path
    pub workspace_root: PathBuf,
    /// Summary statistics
    pub summary: ValidationSummary,
    /// Declared layers and their units, per crate
    pub crates: Vec<CrateSummary>,
    /// Layer rule violations
    pub violations: Vec<UnitViolation>,
}

/// Summary of validation results
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    /// Total number of violations
    pub total_violations: usize,
    /// Number of error-level violations
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of violations per category
    pub by_category: BTreeMap<ViolationCategory, usize>,
    /// Number of crates scanned
    pub crates_scanned: usize,
    /// Number of `unit!` sites found
    pub units_scanned: usize,
    /// Whether validation passed (no error-level violations)
    pub passed: bool,
}

/// Layer layout of one crate as reported
#[derive(Debug, Clone, Serialize)]
pub struct CrateSummary {
    pub name: String,
    pub config: Option<PathBuf>,
    pub layers: BTreeMap<String, BTreeSet<String>>,
}

impl ValidationReport {
    pub fn new(
        workspace_root: &Path,
        layouts: &[CrateLayout],
        violations: Vec<UnitViolation>,
    ) -> Self {
        let count = |severity| violations.iter().filter(|v| v.severity() == severity).count();
        let error_count = count(Severity::Error);
        let summary = ValidationSummary {
            total_violations: violations.len(),
            error_count,
            warning_count: count(Severity::Warning),
            by_category: violations.iter().fold(BTreeMap::new(), |mut counts, v| {
                *counts.entry(v.category()).or_insert(0) += 1;
                counts
            }),
            crates_scanned: layouts.len(),
            units_scanned: layouts.iter().map(|l| l.units.len()).sum(),
            passed: error_count == 0,
        };
        let crates = layouts
            .iter()
            .map(|layout| CrateSummary {
                name: layout.name.clone(),
                config: layout.config_path.clone(),
                layers: layout.layer_map(),
            })
            .collect();

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            workspace_root: workspace_root.to_path_buf(),
            summary,
            crates,
            violations,
        }
    }

    /// Process exit status for this report: 0 when passed, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        u8::from(!self.summary.passed)
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(report: &ValidationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Generate human-readable report
    pub fn to_human_readable(report: &ValidationReport) -> String {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str("=== Layer Validation Report ===\n\n");
        let _ = writeln!(output, "Timestamp: {}", report.timestamp);
        let _ = writeln!(output, "Workspace: {}\n", report.workspace_root.display());

        output.push_str("--- Summary ---\n");
        let _ = writeln!(output, "Crates:           {}", summary.crates_scanned);
        let _ = writeln!(output, "Units:            {}", summary.units_scanned);
        let _ = writeln!(output, "Total Violations: {}", summary.total_violations);
        let _ = writeln!(output, "  Errors:         {}", summary.error_count);
        let _ = writeln!(output, "  Warnings:       {}", summary.warning_count);
        for (category, count) in &summary.by_category {
            let label = format!("{category}:");
            let _ = writeln!(output, "  {label:<16}{count}");
        }
        output.push('\n');

        let status = if summary.passed { "PASSED" } else { "FAILED" };
        let _ = writeln!(output, "Status: {status}\n");

        if !report.violations.is_empty() {
            output.push_str("--- Violations ---\n");
            for v in &report.violations {
                let _ = writeln!(
                    output,
                    "  [{}] {} ({}): {}",
                    v.severity(),
                    v.id(),
                    v.category(),
                    v.message()
                );
                if let Some(suggestion) = v.suggestion() {
                    let _ = writeln!(output, "      hint: {suggestion}");
                }
            }
            output.push('\n');
        }

        output
    }

    /// Layer to units map of every crate
    pub fn to_layer_listing(layouts: &[CrateLayout]) -> String {
        let mut output = String::new();
        for layout in layouts {
            let _ = writeln!(output, "{}", layout.name);
            if let Some(config) = &layout.config_path {
                let _ = writeln!(output, "  config: {}", config.display());
            }
            let layers = layout.layer_map();
            if layers.is_empty() {
                output.push_str("  (no layers)\n");
            }
            for (layer, units) in &layers {
                let units: Vec<&str> = units.iter().map(String::as_str).collect();
                let _ = write!(output, "  {layer}: {}", units.join(", "));
                if let Some(settings) = layout.config.layers.get(layer) {
                    if !settings.depends_on.is_empty() {
                        let _ = write!(output, " (depends on {})", settings.depends_on.join(", "));
                    }
                }
                output.push('\n');
            }
        }
        output
    }
}
