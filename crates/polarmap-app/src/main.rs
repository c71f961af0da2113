//! `polarmap`: polar-projection world maps with the Sun, the Moon and the
//! day/night terminator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run `polarmap render --daylight` for a map of right now, or
//! `polarmap animate --start ... --end ...` for a GIF.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use polarmap_config::{CliArgs, Command, Config};
use polarmap_ephemeris::LowPrecisionEphemeris;

use crate::commands::{AppError, Positions};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config_dir().unwrap_or_else(|e| {
        eprintln!("{e}, using ./polarmap");
        PathBuf::from("polarmap")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    polarmap_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let command = args.command.clone().unwrap_or(Command::Render {
        time: None,
        daylight: false,
    });
    match run(command, &config, &config_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config, config_dir: &std::path::Path) -> Result<(), AppError> {
    let provider = LowPrecisionEphemeris;
    match command {
        Command::Render { time, .. } => {
            commands::render(config, &provider, time.unwrap_or_else(Utc::now))
        }
        Command::Animate {
            start, end, frames, ..
        } => commands::animate(config, provider, start, end, frames),
        Command::Positions { time, json } => {
            let positions = Positions::at(&provider, time.unwrap_or_else(Utc::now));
            let mut stdout = std::io::stdout().lock();
            if json {
                positions.write_json(&mut stdout)
            } else {
                Ok(positions.write_text(&mut stdout)?)
            }
        }
        Command::InitConfig => commands::init_config(config, config_dir),
    }
}
