use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use roster_core::{BuildOptions, ConvertOptions, SkipReason};

use super::{reference_year, roster_path};
use crate::config::{self, Config};

pub struct ConvertArgs {
    pub file: Option<PathBuf>,
    pub employee: Option<String>,
    pub output: Option<PathBuf>,
    pub year: Option<i32>,
    pub timezone: Option<String>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let cfg = config::load_config()?;

    let employee = employee_name(&args, &cfg)?;
    let options = convert_options(&args, &cfg)?;
    let path = roster_path(args.file.clone())?;

    let conversion = roster_core::convert(&path, &employee, &options)
        .with_context(|| format!("Failed to convert {}", path.display()))?;

    if let Some(ref label) = conversion.week_label {
        println!("📅 {}", label);
    }
    println!("👤 {}", conversion.employee.name.bold());

    for event in &conversion.document.events {
        println!(
            "  {} {} {}",
            "+".green(),
            event.start.format("%a %Y-%m-%d"),
            event.summary
        );
    }

    for skipped in &conversion.skipped {
        let day = format!("{} {}/{}", skipped.day.weekday, skipped.day.day, skipped.day.month);
        match skipped.reason {
            SkipReason::NoShift => println!("  {} {} (off)", "-".dimmed(), day.dimmed()),
            ref reason => println!("  {} {}: {}", "!".yellow(), day, reason.yellow()),
        }
    }

    let output = output_path(args.output, &cfg, Local::now().date_naive());
    conversion
        .write_to(&output, Utc::now())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "\nWrote {} events to {}",
        conversion.document.events.len(),
        output.display()
    );

    Ok(())
}

/// Employee from the command line, else from config
fn employee_name(args: &ConvertArgs, cfg: &Config) -> Result<String> {
    match args.employee.as_ref().or(cfg.employee.as_ref()) {
        Some(name) => Ok(name.clone()),
        None => anyhow::bail!(
            "No employee given.\n\n\
            Pass one with --employee <NAME>, or set a default in {}:\n\n\
            employee = \"Lulu\"",
            config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string())
        ),
    }
}

/// Engine options from flags, falling back to config values
fn convert_options(args: &ConvertArgs, cfg: &Config) -> Result<ConvertOptions> {
    let timezone = match args.timezone {
        Some(ref tz) => config::parse_timezone(tz)?,
        None => cfg.timezone()?,
    };

    Ok(ConvertOptions {
        reference_year: reference_year(args.year),
        build: BuildOptions {
            timezone,
            prod_id: cfg.prod_id.clone(),
            uid_seed: String::new(),
        },
    })
}

/// Explicit output path, or the dated default name inside output_dir
fn output_path(output: Option<PathBuf>, cfg: &Config, today: NaiveDate) -> PathBuf {
    output.unwrap_or_else(|| cfg.output_dir().join(roster_core::default_output_filename(today)))
}
