use crate::model::{IdGenerator, RandomIds, SequentialIds};
use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStyle {
    #[default]
    Sequential,
    Random,
}

impl IdStyle {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStyle::Sequential => Box::new(SequentialIds::default()),
            IdStyle::Random => Box::new(RandomIds::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub week_start: WeekStart,
    pub ids: IdStyle,
    /// Preselect today on startup instead of starting with no day.
    pub select_today: bool,
    pub confirm_delete: bool,
    pub placeholder: String,
    pub submit_label: String,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            week_start: WeekStart::Monday,
            ids: IdStyle::Sequential,
            select_today: false,
            confirm_delete: true,
            placeholder: "할 일을 입력하세요".into(),
            submit_label: "추가".into(),
            log_file: None,
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub exists: bool,
}

pub fn locate_config(explicit: Option<&Path>) -> Result<ConfigLocation> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    let exists = path.exists();
    Ok(ConfigLocation { path, exists })
}

/// Loads the config at `location`, falling back to defaults when the file is
/// missing.
pub fn load_config(location: &ConfigLocation) -> Result<Config, ConfigError> {
    if !location.exists {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(&location.path).map_err(|source| ConfigError::Read {
        path: location.path.clone(),
        source,
    })?;
    parse_config(&data).map_err(|source| ConfigError::Parse {
        path: location.path.clone(),
        source,
    })
}

pub fn parse_config(data: &str) -> Result<Config, serde_yaml::Error> {
    if data.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(data)
}

pub fn render_config(config: &Config) -> Result<String> {
    serde_yaml::to_string(config).context("serializing config")
}

fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "daymark").context("locating config directory")?;
    Ok(dirs.config_dir().join("config.yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("  \n").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config("week_start: sunday\nids: random\n").unwrap();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.ids, IdStyle::Random);
        assert!(config.confirm_delete);
        assert_eq!(config.submit_label, "추가");
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(parse_config("week_start: friday\n").is_err());
    }

    #[test]
    fn rendered_config_parses_back() {
        let mut config = Config::default();
        config.placeholder = "Enter a task".into();
        config.log_file = Some(PathBuf::from("/tmp/daymark.log"));
        let yaml = render_config(&config).unwrap();
        assert_eq!(parse_config(&yaml).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let location = locate_config(Some(&dir.path().join("nope.yml"))).unwrap();
        assert!(!location.exists);
        assert_eq!(load_config(&location).unwrap(), Config::default());
    }

    #[test]
    fn file_on_disk_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "select_today: true\nsubmit_label: Add").unwrap();
        let location = locate_config(Some(&path)).unwrap();
        let config = load_config(&location).unwrap();
        assert!(config.select_today);
        assert_eq!(config.submit_label, "Add");
    }

    #[test]
    fn broken_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "confirm_delete: [").unwrap();
        let location = locate_config(Some(&path)).unwrap();
        assert!(matches!(
            load_config(&location),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn id_style_builds_matching_generator() {
        let mut ids = IdStyle::Sequential.generator();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(IdStyle::Random.generator().next_id().len(), 6);
    }
}
