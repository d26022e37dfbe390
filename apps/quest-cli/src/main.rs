//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! Every command works on the project's quest (`.quest/goals.txt` by default):
//! - `quest info` — score, level and progress
//! - `quest goal add/list` — create and inspect goals
//! - `quest record <n>` — record progress against goal number `n`
//! - `quest save/load <path>` — export or import a quest file
//! - `quest history` — recent activity

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

use commands::Session;

/// Eternal Quest — track goals, earn points, level up.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show score, level and goal progress.
    Info,
    /// Create and list goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Record progress against a goal.
    Record {
        /// Goal number as shown by `quest goal list`.
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Save the quest to a file.
    Save {
        /// Destination file (e.g., goals.txt).
        path: PathBuf,
    },
    /// Replace the quest with the contents of a file.
    Load {
        /// Source file (e.g., goals.txt).
        path: PathBuf,
    },
    /// Show recent quest activity.
    History {
        /// Number of most recent entries to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("quest_goal=warn".parse()?)
                .add_directive("quest_cli=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = resolve_project_root(&cli.project_root)?;
    let config = QuestConfig::load(&project_root)?;
    tracing::debug!(save_file = %config.save_file.display(), "using quest");

    // Only the commands that read the project quest open it, so a damaged
    // save file still allows `history` and `load`.
    match &cli.command {
        Commands::Info => commands::info::execute(&Session::open(config)?),
        Commands::Goal { command } => {
            commands::goal::execute(command, &mut Session::open(config)?)
        }
        Commands::Record { number } => {
            commands::record::execute(&mut Session::open(config)?, *number)
        }
        Commands::Save { path } => commands::transfer::save(&Session::open(config)?, path),
        Commands::Load { path } => {
            commands::transfer::load(&mut Session::open_for_replace(config), path)
        }
        Commands::History { limit } => commands::history::execute(&config, *limit),
    }
}

/// The project root must already exist; `.quest/` is created inside it.
fn resolve_project_root(path: &Path) -> anyhow::Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("project root {} does not exist", path.display()))
}
