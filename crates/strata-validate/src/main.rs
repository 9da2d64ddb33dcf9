//! strata-validate - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `strata-validate check` | Validate every crate, exit non-zero on errors |
//! | `strata-validate layers` | Print each crate's layer to units map |
//! | `strata-validate scope <LAYER>` | Print the scope module a layer resolves to |

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use strata_core::Mode;
use strata_validate::logging::init_logging;
use strata_validate::{Reporter, StrataValidator, ValidateConfig, resolve_scope};

/// Command line interface for strata-validate
#[derive(Parser, Debug)]
#[command(name = "strata-validate")]
#[command(about = "Check layer rules of a workspace built with strata")]
#[command(version)]
struct Cli {
    /// Log level (overridden by STRATA_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every crate
    Check {
        /// Workspace root (or a single crate root)
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Skip paths containing this pattern (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Print each crate's declared layers and their units
    Layers {
        /// Workspace root (or a single crate root)
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Print the scope module a layer resolves to
    Scope {
        /// Layer name
        layer: String,

        /// Build mode: production or test
        #[arg(long, default_value = "production")]
        mode: Mode,

        /// Directory to discover strata.toml from
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Command::Check {
            root,
            format,
            exclude,
        } => {
            let config = exclude
                .into_iter()
                .fold(ValidateConfig::new(&root), |config, pattern| {
                    config.with_exclude_pattern(pattern)
                });
            let report = StrataValidator::new(config)
                .validate()
                .with_context(|| format!("validating {}", root.display()))?;
            match format {
                OutputFormat::Human => print!("{}", Reporter::to_human_readable(&report)),
                OutputFormat::Json => println!("{}", Reporter::to_json(&report)?),
            }
            Ok(ExitCode::from(report.exit_status()))
        }
        Command::Layers { root } => {
            let layouts = StrataValidator::new(ValidateConfig::new(&root))
                .layouts()
                .with_context(|| format!("reading layers under {}", root.display()))?;
            print!("{}", Reporter::to_layer_listing(&layouts));
            Ok(ExitCode::SUCCESS)
        }
        Command::Scope {
            layer,
            mode,
            config_dir,
        } => {
            let scope = resolve_scope(&layer, mode, &config_dir)
                .with_context(|| format!("resolving `{layer}` from {}", config_dir.display()))?;
            println!("{scope}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
