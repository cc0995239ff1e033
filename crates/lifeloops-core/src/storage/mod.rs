mod config;
pub mod goal_db;

pub use config::{Config, LogConfig, SuggestionsConfig};
pub use goal_db::GoalDb;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/lifeloops[-dev]/` based on LIFELOOPS_ENV.
///
/// Set LIFELOOPS_ENV=dev to use development data directory, or
/// LIFELOOPS_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Resolve the data directory without creating it.
pub(crate) fn data_dir_path() -> PathBuf {
    match std::env::var_os("LIFELOOPS_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LIFELOOPS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("lifeloops-dev")
            } else {
                base_dir.join("lifeloops")
            }
        }
    }
}
