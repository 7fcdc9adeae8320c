use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{reference_year, roster_path};

pub fn run(file: Option<PathBuf>, year: Option<i32>) -> Result<()> {
    let path = roster_path(file)?;
    let grid = roster_core::load(&path)?;

    match roster_core::resolve_week_label(&grid) {
        Some(label) => println!("📅 {}", label.bold()),
        None => println!("📅 {}", "(no week label)".dimmed()),
    }

    let days = roster_core::resolve_days(&grid, reference_year(year))?;
    if days.is_empty() {
        println!("  No day headers recognized");
        return Ok(());
    }

    for day in &days {
        let date = match day.date() {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => format!("{}-{:02}-{:02} (invalid)", day.year, day.month, day.day)
                .red()
                .to_string(),
        };
        println!("  {:<10} {}", day.weekday, date);
    }

    Ok(())
}
