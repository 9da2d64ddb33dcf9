//! Journal - Entry Point
//!
//! Command line front end over the `interactor` layer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strata_journal::{entity, interactor};
use tracing_subscriber::EnvFilter;

/// Command line interface for the journal
#[derive(Parser, Debug)]
#[command(name = "journal")]
#[command(about = "A layered note journal")]
#[command(version)]
struct Cli {
    /// Journal file (defaults to `journal.jsonl` in the current directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(short, long, default_value = "")]
        body: String,
        /// Tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List notes, optionally only those carrying a tag
    List {
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show one note by title
    Show { title: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("JOURNAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli
        .file
        .unwrap_or_else(|| PathBuf::from(interactor::DEFAULT_STORE_FILE));

    match cli.command {
        Command::Add { title, body, tags } => {
            let note = tags
                .into_iter()
                .fold(entity::Note::new(title, body), |note, tag| {
                    note.with_tag(tag)
                });
            interactor::add_new_entity_at(&path, &note)
                .with_context(|| format!("adding note to {}", path.display()))?;
            println!("Added \"{}\"", note.title);
        }
        Command::List { tag } => {
            let notes = match tag {
                Some(tag) => interactor::find_by_tag(&path, &tag),
                None => interactor::list_entities_at(&path),
            }
            .with_context(|| format!("reading {}", path.display()))?;
            for note in &notes {
                print_summary(note);
            }
        }
        Command::Show { title } => {
            let note = interactor::find_entity(&path, &title)?;
            print_summary(&note);
            if !note.body.is_empty() {
                println!("\n{}", note.body);
            }
        }
    }
    Ok(())
}

fn print_summary(note: &entity::Note) {
    if note.tags.is_empty() {
        println!("{}", note.title);
    } else {
        println!("{} [{}]", note.title, note.tags.join(", "));
    }
}
