//! Command-line argument parsing for polarmap.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::Config;
use crate::error::ConfigError;

const APP_NAME: &str = "polarmap";

/// polarmap command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "polarmap", about = "Polar-projection world map with day/night shading")]
pub struct CliArgs {
    /// Latitude of the map center.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub center_lat: Option<f64>,

    /// Longitude of the map center.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub center_lon: Option<f64>,

    /// Output image path (GIF path for `animate`).
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Output resolution in dots per inch.
    #[arg(long, global = true)]
    pub dpi: Option<u32>,

    /// Map title.
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Coastline text file.
    #[arg(long, global = true)]
    pub coastlines: Option<PathBuf>,

    /// Cities CSV file; also turns the city layer on.
    #[arg(long, global = true)]
    pub cities: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do once the configuration is resolved.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render a single map.
    Render {
        /// Instant to draw the Sun and Moon for (RFC 3339). Defaults to now.
        #[arg(long)]
        time: Option<DateTime<Utc>>,

        /// Shade the sunlit hemisphere.
        #[arg(long)]
        daylight: bool,
    },
    /// Render an animated GIF over a time range.
    Animate {
        /// First frame instant (RFC 3339).
        #[arg(long)]
        start: DateTime<Utc>,

        /// End of the range (RFC 3339); not itself drawn.
        #[arg(long)]
        end: DateTime<Utc>,

        /// Number of frames.
        #[arg(long, default_value_t = 24)]
        frames: usize,

        /// Delay between frames in milliseconds.
        #[arg(long)]
        interval_ms: Option<u32>,

        /// Shade the sunlit hemisphere.
        #[arg(long)]
        daylight: bool,
    },
    /// Print sub-solar and sub-lunar points.
    Positions {
        /// Instant to compute for (RFC 3339). Defaults to now.
        #[arg(long)]
        time: Option<DateTime<Utc>>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Write the effective configuration to the config directory.
    InitConfig,
}

impl CliArgs {
    /// The directory holding `config.ron`: `--config` if given, else the OS
    /// config directory joined with `polarmap`.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(dir) => Ok(dir.clone()),
            None => default_config_dir(),
        }
    }
}

/// Platform default config directory for polarmap.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(lat) = args.center_lat {
            self.map.center_lat = lat;
        }
        if let Some(lon) = args.center_lon {
            self.map.center_lon = lon;
        }
        if let Some(ref output) = args.output {
            match args.command {
                Some(Command::Animate { .. }) => self.output.animation_file = output.clone(),
                Some(Command::Render { .. }) | None => self.output.file = output.clone(),
                // Commands that draw nothing keep the path for whichever
                // output its extension names.
                _ if is_gif(output) => self.output.animation_file = output.clone(),
                _ => self.output.file = output.clone(),
            }
        }
        if let Some(dpi) = args.dpi {
            self.figure.dpi = dpi;
        }
        if let Some(ref title) = args.title {
            self.map.title = title.clone();
        }
        if let Some(ref path) = args.coastlines {
            self.data.coastline_file = path.clone();
        }
        if let Some(ref path) = args.cities {
            self.data.cities_file = path.clone();
            self.layers.cities = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        match args.command {
            Some(Command::Render { daylight: true, .. })
            | Some(Command::Animate { daylight: true, .. }) => self.layers.daylight = true,
            _ => {}
        }
        if let Some(Command::Animate {
            interval_ms: Some(ms),
            ..
        }) = args.command
        {
            self.output.frame_interval_ms = ms;
        }
    }
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}
