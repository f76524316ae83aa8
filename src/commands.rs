use crate::config::{load_config, locate_config, render_config, Config, ConfigLocation};
use crate::logging;
use crate::model::TodoStore;
use crate::session::Session;
use crate::ui;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::Path;

pub fn tui(config_path: Option<&Path>, day: Option<NaiveDate>) -> Result<()> {
    let (config, location) = load_current_config(config_path)?;
    logging::init(&config, true)?;
    log::info!("starting daymark (config {:?})", location.path);

    let today = Local::now().date_naive();
    let mut session = Session::new(TodoStore::new(config.ids.generator()));
    let initial = match day {
        Some(day) => Some(day),
        None if config.select_today => Some(today),
        None => None,
    };
    if let Some(day) = initial {
        session.select_day(ui::day_key(day));
    }

    let result = ui::run(session, config, initial.unwrap_or(today));
    log::info!("daymark exited");
    result
}

pub fn show_config(config_path: Option<&Path>) -> Result<()> {
    let (config, location) = load_current_config(config_path)?;
    logging::init(&config, false)?;
    println!(
        "Config: {} ({})",
        location.path.display(),
        if location.exists { "loaded" } else { "not found, using defaults" }
    );
    print!("{}", render_config(&config)?);
    Ok(())
}

fn load_current_config(explicit: Option<&Path>) -> Result<(Config, ConfigLocation)> {
    let location = locate_config(explicit)?;
    let config = load_config(&location)?;
    Ok((config, location))
}
