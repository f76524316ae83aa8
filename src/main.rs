mod cli;
mod commands;
mod config;
mod input;
mod logging;
mod markers;
mod model;
mod session;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    let config_path = args.config.as_deref();
    match command {
        cli::Command::Tui => commands::tui(config_path, args.day),
        cli::Command::Config => commands::show_config(config_path),
    }
}
