//! ordinal: insert and renumber sections of numbered markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::{Args as ClapArgs, Parser, Subcommand};
use ordinal::config::Config;
use ordinal::edit_plan::{self, EditPlan, Insertion};
use ordinal::formats::markdown::MarkdownFormat;
use ordinal::{input, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ordinal")]
#[command(about = "Insert sections into numbered markdown documents", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./ordinal.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Heading level of numbered sections
    #[arg(long, global = true, value_name = "N")]
    level: Option<usize>,

    /// Separator between section number and title
    #[arg(long, global = true, value_name = "SEP")]
    separator: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert a new section and renumber the ones after it
    Insert(InsertArgs),
    /// List the numbered sections of a document
    List {
        /// Document to read
        file: PathBuf,
        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that a document is contiguously numbered
    Check {
        /// Document to read
        file: PathBuf,
    },
    /// Apply an edit plan (JSON) to the file it names
    Apply {
        /// Edit plan to load
        plan: PathBuf,
        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ClapArgs)]
struct InsertArgs {
    /// Document to edit
    file: PathBuf,

    /// Number the new section will carry
    #[arg(long, value_name = "N")]
    at: usize,

    /// Title of the new section
    #[arg(long, required_unless_present = "section_file", conflicts_with = "section_file")]
    title: Option<String>,

    /// Body text of the new section
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the body from a file
    #[arg(long, value_name = "FILE")]
    body_file: Option<PathBuf>,

    /// Read heading and body from a markdown snippet (its number is ignored)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["body", "body_file"])]
    section_file: Option<PathBuf>,

    /// Rewrite the document instead of printing it
    #[arg(long)]
    in_place: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordinal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut cfg = Config::load(args.config.as_deref());

    // Override config with command line args
    if let Some(level) = args.level {
        cfg.heading_level = level;
    }
    if let Some(separator) = args.separator {
        cfg.separator = separator;
    }
    let format = cfg.format()?;

    match args.command {
        Command::Insert(insert) => run_insert(insert, &format)?,
        Command::List { file, json } => run_list(&file, json, &format)?,
        Command::Check { file } => {
            let document = input::read_document(&file, &format)?;
            println!("{}: {} sections, numbering ok", file.display(), document.len());
        }
        Command::Apply { plan, dry_run } => {
            let plan = EditPlan::load(&plan)?;
            if dry_run {
                let text = fs::read_to_string(&plan.file_name)?;
                print!("{}", plan.apply_to_text(&text, &format)?);
            } else {
                plan.apply(&format)?;
                eprintln!("Applied {} insertions to {}", plan.insertions.len(), plan.file_name);
            }
        }
    }

    Ok(())
}

fn run_insert(args: InsertArgs, format: &MarkdownFormat) -> Result<(), Error> {
    let (title, body) = if let Some(snippet) = &args.section_file {
        input::parse_snippet(&fs::read_to_string(snippet)?, format)?
    } else {
        let body = match (args.body, &args.body_file) {
            (Some(body), _) => body,
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => String::new(),
        };
        (args.title.unwrap_or_default(), body)
    };

    let plan = EditPlan {
        file_name: args.file.to_string_lossy().to_string(),
        insertions: vec![Insertion {
            target: args.at,
            title,
            body,
        }],
    };

    let text = fs::read_to_string(&args.file)?;
    let output = plan.apply_to_text(&text, format)?;

    if args.in_place {
        edit_plan::write_atomically(&args.file, &output)?;
        eprintln!("Inserted section {} into {}", args.at, args.file.display());
    } else {
        print!("{output}");
    }
    Ok(())
}

fn run_list(file: &Path, json: bool, format: &MarkdownFormat) -> Result<(), Error> {
    let document = input::read_document(file, format)?;

    if json {
        println!("{}", document.outline_json()?);
    } else {
        for section in &document {
            println!("{}{} {}", section.number, format.separator(), section.title);
        }
    }
    Ok(())
}
