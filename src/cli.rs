use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daymark", version, about = "Terminal to-do list grouped by calendar day")]
pub struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Day to select on startup, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive TUI
    Tui,
    /// Print the config path and the effective settings
    Config,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid day {0:?} (use YYYY-MM-DD)")]
pub struct DayKeyError(pub String);

pub fn parse_day(raw: &str) -> Result<NaiveDate, DayKeyError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DayKeyError(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_flag_accepts_iso_dates() {
        let cli = Cli::try_parse_from(["daymark", "--day", "2024-05-01"]).unwrap();
        assert_eq!(cli.day, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(cli.command.is_none());
    }

    #[test]
    fn day_flag_rejects_garbage() {
        assert!(Cli::try_parse_from(["daymark", "--day", "2024-13-01"]).is_err());
        assert_eq!(
            parse_day("tomorrow"),
            Err(DayKeyError("tomorrow".to_string()))
        );
    }

    #[test]
    fn config_subcommand_takes_global_path() {
        let cli = Cli::try_parse_from(["daymark", "config", "--config", "/tmp/x.yml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.yml")));
    }
}
