mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, show, EditArgs, EditCommand, ShowArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folio CLI - structural editing for JSON documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to folio.config.json in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log editor internals to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lift the selected list items one level up
    Lift(EditArgs),

    /// Lift the list item at the caret if it is empty
    LiftEmpty(EditArgs),

    /// Split the list item at the caret
    Split(EditArgs),

    /// Join the next list item into the one at the caret
    JoinForward(EditArgs),

    /// Join the list item at the caret into the previous one
    JoinBackward(EditArgs),

    /// Split the text block at the caret
    SplitParagraph(EditArgs),

    /// Delete the selected range
    Delete(EditArgs),

    /// Paste plain text at the caret
    PasteText {
        /// Text to paste; newlines start new paragraphs
        text: String,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Print the document outline and selection
    Show(ShowArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();
    let config = Config::load(&cwd, cli.config.as_deref())?;

    let (command, args) = match cli.command {
        Command::Show(args) => return show(args),
        Command::Lift(args) => (EditCommand::Lift, args),
        Command::LiftEmpty(args) => (EditCommand::LiftEmpty, args),
        Command::Split(args) => (EditCommand::Split, args),
        Command::JoinForward(args) => (EditCommand::JoinForward, args),
        Command::JoinBackward(args) => (EditCommand::JoinBackward, args),
        Command::SplitParagraph(args) => (EditCommand::SplitParagraph, args),
        Command::Delete(args) => (EditCommand::Delete, args),
        Command::PasteText { text, edit } => (EditCommand::PasteText(text), edit),
    };
    edit(command, args, &config)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
