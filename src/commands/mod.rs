pub mod convert;
pub mod employees;
pub mod inspect;
pub mod week;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};

/// Use the given roster path, or find one in `dir`.
pub fn resolve_roster(file: Option<PathBuf>, dir: &Path) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }

    let found = roster_core::find_roster_file(dir)
        .with_context(|| format!("Failed to search {} for a roster", dir.display()))?;

    match found {
        Some(path) => {
            println!("Found roster: {}", path.display());
            Ok(path)
        }
        None => anyhow::bail!(
            "No roster file given and no \"{}*{}\" file found in {}",
            roster_core::convert::ROSTER_FILE_PREFIX,
            roster_core::convert::ROSTER_FILE_EXTENSION,
            dir.display()
        ),
    }
}

/// Resolve the roster path against the current directory
pub fn roster_path(file: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    resolve_roster(file, &cwd)
}

/// Year given on the command line, or the current year
pub fn reference_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Local::now().year())
}
