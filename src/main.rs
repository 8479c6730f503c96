//! # tf - TaskFlow CLI
//!
//! Track tasks by project and priority from the terminal.
//!
//! ```bash
//! tf add "Create project plan" --project Work --priority high
//! tf list --view active --project Work
//! tf toggle "Create project plan"
//! tf project add Errands
//! tf stats
//! ```
//!
//! Data is stored in `~/.taskflow/` as `tasks.json` and `projects.json`.

use std::path::PathBuf;

use clap::Parser;

use taskflow::cli::Cli;
use taskflow::cmd::*;
use taskflow::config::{init_logging, resolve_data_dir};
use taskflow::{FileStore, Tracker};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> taskflow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Add { title, project, priority } => {
            let mut tracker = open_tracker(cli.data_dir)?;
            cmd_add(&mut tracker, title, project, priority)
        }
        Commands::List { view, project } => {
            let tracker = open_tracker(cli.data_dir)?;
            cmd_list(&tracker, view, project);
            Ok(())
        }
        Commands::Toggle { id } => cmd_toggle(&mut open_tracker(cli.data_dir)?, id),
        Commands::Delete { id } => cmd_delete(&mut open_tracker(cli.data_dir)?, id),
        Commands::Project { action } => cmd_project(&mut open_tracker(cli.data_dir)?, action),
        Commands::Stats => {
            cmd_stats(&open_tracker(cli.data_dir)?);
            Ok(())
        }
    }
}

fn open_tracker(data_dir: Option<PathBuf>) -> taskflow::Result<Tracker<FileStore>> {
    let data_dir = resolve_data_dir(data_dir)?;
    let store = FileStore::open(&data_dir)?;
    Ok(Tracker::open(store))
}
