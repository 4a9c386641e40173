// Data directory resolution

use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GLENNOW_DATA_DIR";

/// Resolves where the store files live.
///
/// An explicit `--data-dir` (or `GLENNOW_DATA_DIR`, which clap folds into the
/// same flag) wins; otherwise `~/.glennow/`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    Ok(home_dir()?.join(".glennow"))
}

fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let home = std::env::var("HOME").map_err(|_| anyhow!("HOME environment variable not set"))?;

    #[cfg(windows)]
    let home = std::env::var("USERPROFILE")
        .map_err(|_| anyhow!("USERPROFILE environment variable not set"))?;

    Ok(PathBuf::from(home))
}
