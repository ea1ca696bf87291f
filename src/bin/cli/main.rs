mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recall_lib::Config;

#[derive(Parser)]
#[command(name = "recall-cli", about = "Spaced repetition for prompt/answer slides", version)]
struct Cli {
    /// Data file to use (default: from config, then the platform data dir)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List collections with slide and due counts
    Collections,

    /// Create, rename or remove collections
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// List the slides in a collection
    Slides {
        /// Collection name (case-insensitive prefix match)
        collection: String,
    },

    /// Add a slide to a collection
    Add {
        /// Collection name
        collection: String,
        /// Question text
        prompt: String,
        /// Answer text
        answer: String,
    },

    /// Change a slide's prompt or answer (its schedule is kept)
    Edit {
        /// Collection name
        collection: String,
        /// Slide number (1-based) or id prefix
        slide: String,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },

    /// Remove a slide from a collection
    Remove {
        /// Collection name
        collection: String,
        /// Slide number (1-based) or id prefix
        slide: String,
    },

    /// Show the slide that would be studied next
    Next {
        /// Collection name
        collection: String,
    },

    /// Study a collection interactively
    Study {
        /// Collection name
        collection: String,
        /// Stop after this many ratings
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum CollectionCommand {
    /// Create an empty collection
    New {
        name: String,
    },

    /// Rename a collection
    Rename {
        /// Current name (case-insensitive prefix match)
        collection: String,
        /// New name
        name: String,
    },

    /// Remove a collection and all its slides
    Remove {
        /// Collection name
        collection: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();
    let use_color = !cli.no_color && config.color && std::io::stdout().is_terminal();
    let mut app = app::App::open(config, cli.data)?;

    match cli.command {
        Command::Collections => {
            commands::collections::run_list(&app, &cli.format, use_color)?;
        }
        Command::Collection(subcmd) => match subcmd {
            CollectionCommand::New { name } => {
                commands::collections::run_new(&mut app, &name, &cli.format)?;
            }
            CollectionCommand::Rename { collection, name } => {
                commands::collections::run_rename(&mut app, &collection, &name)?;
            }
            CollectionCommand::Remove { collection } => {
                commands::collections::run_remove(&mut app, &collection)?;
            }
        },
        Command::Slides { collection } => {
            commands::slides::run_list(&app, &collection, &cli.format, use_color)?;
        }
        Command::Add { collection, prompt, answer } => {
            commands::slides::run_add(&mut app, &collection, prompt, answer, &cli.format)?;
        }
        Command::Edit { collection, slide, prompt, answer } => {
            commands::slides::run_edit(&mut app, &collection, &slide, prompt, answer)?;
        }
        Command::Remove { collection, slide } => {
            commands::slides::run_remove(&mut app, &collection, &slide)?;
        }
        Command::Next { collection } => {
            commands::study::run_next(&app, &collection, &cli.format)?;
        }
        Command::Study { collection, limit } => {
            commands::study::run(&mut app, &collection, limit, use_color)?;
        }
    }

    Ok(())
}
