use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use roster_core::event::{DEFAULT_PROD_ID, DEFAULT_TIMEZONE};
use serde::Deserialize;

/// Settings from ~/.config/roster-ical/config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IANA zone shifts are localized to
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// PRODID written to generated calendars
    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    /// Employee to convert when none is given on the command line
    pub employee: Option<String>,

    /// Directory .ics files are written to (defaults to the current directory)
    pub output_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: default_timezone(),
            prod_id: default_prod_id(),
            employee: None,
            output_dir: None,
        }
    }
}

impl Config {
    /// Parsed time zone
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Output directory with ~ expanded
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => expand_path(dir),
            None => PathBuf::from("."),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.name().to_string()
}

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

/// Parse an IANA zone name such as "Pacific/Auckland"
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone '{}'", name))
}

/// Get the config directory path (~/.config/roster-ical)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("roster-ical");
    Ok(config_dir)
}

/// Get the config file path (~/.config/roster-ical/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/roster-ical/config.toml, or defaults if it doesn't exist
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    // Fail early rather than on the first conversion
    config
        .timezone()
        .with_context(|| format!("Invalid timezone in {}", path.display()))?;

    Ok(config)
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (_dir, path) = write_config("");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.timezone, "Pacific/Auckland");
        assert_eq!(config.prod_id, "-//Sushi Restaurant Shift Schedule//EN");
        assert_eq!(config.employee, None);
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_full_config() {
        let (_dir, path) = write_config(
            r#"
timezone = "Australia/Sydney"
prod_id = "-//Harbour Kitchen//EN"
employee = "Lulu"
output_dir = "/tmp/rosters"
"#,
        );

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.timezone().unwrap(), chrono_tz::Australia::Sydney);
        assert_eq!(config.prod_id, "-//Harbour Kitchen//EN");
        assert_eq!(config.employee.as_deref(), Some("Lulu"));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/rosters"));
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let (_dir, path) = write_config("timezone = \"Mars/Olympus\"");

        let err = load_config_from(&path).unwrap_err();
        assert!(
            format!("{:#}", err).contains("Mars/Olympus"),
            "error should name the zone: {:#}",
            err
        );
    }

    #[test]
    fn test_malformed_config_is_error() {
        let (_dir, path) = write_config("timezone = ");
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/abs/dir"), PathBuf::from("/abs/dir"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/rosters"), home.join("rosters"));
        }
    }
}
