use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::roster_path;

pub fn run(file: Option<PathBuf>, json: bool) -> Result<()> {
    let path = roster_path(file)?;
    let grid = roster_core::load(&path)?;
    let employees = roster_core::list_employees(&grid);

    if json {
        let out = serde_json::to_string_pretty(&employees).context("Failed to serialize employees")?;
        println!("{}", out);
        return Ok(());
    }

    if employees.is_empty() {
        println!("No employees found in {}", path.display());
        return Ok(());
    }

    for employee in &employees {
        println!("  {} {}", format!("row {:>3}", employee.row + 1).dimmed(), employee.name);
    }
    println!("\n{} employees", employees.len());

    Ok(())
}
