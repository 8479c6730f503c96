//! Runtime configuration: where data lives and how loud logging is.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "TASKFLOW_DIR";
/// Directory under the user's home used when nothing else is configured.
pub const DEFAULT_DIR_NAME: &str = ".taskflow";

/// Resolve the data directory.
///
/// `explicit` carries `--data-dir` or `TASKFLOW_DIR` (clap folds the two);
/// otherwise `~/.taskflow` is used.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| Error::NotFound("home directory; pass --data-dir".into()))
}

/// Log filter for the binary. `RUST_LOG` wins when set.
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("taskflow=debug,warn")
        } else {
            EnvFilter::new("taskflow=warn")
        }
    })
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
