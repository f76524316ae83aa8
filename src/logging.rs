use crate::config::Config;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

/// Sets up `env_logger`. The TUI owns the terminal, so it only logs when a
/// log file is configured; other commands log to stderr when `RUST_LOG` asks.
pub fn init(config: &Config, interactive: bool) -> Result<()> {
    let env = Env::default().default_filter_or(config.log_level.as_str());
    let mut builder = Builder::from_env(env);
    match (&config.log_file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {:?}", path))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        (None, true) => {
            builder.filter_level(log::LevelFilter::Off);
        }
        (None, false) => {
            if std::env::var_os("RUST_LOG").is_none() {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.try_init().context("installing logger")?;
    Ok(())
}
