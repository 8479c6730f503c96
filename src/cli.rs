use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::DATA_DIR_ENV;

/// Local task tracker with projects and priorities.
/// Data is kept in ~/.taskflow unless --data-dir or TASKFLOW_DIR says otherwise.
#[derive(Parser)]
#[command(name = "tf", version, about = "Track tasks by project and priority")]
pub struct Cli {
    /// Directory holding tasks.json and projects.json.
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Log store activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
