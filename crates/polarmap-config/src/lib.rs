//! Configuration system for polarmap.
//!
//! Provides the map settings that persist to disk as RON files, with CLI
//! overrides via clap and forward/backward compatible serialization. The
//! resolved [`Config`] is an immutable value handed to each component.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command, default_config_dir};
pub use config::{
    CONFIG_FILE_NAME, Config, DataConfig, DebugConfig, FigureConfig, GridConfig,
    IlluminationConfig, LayerConfig, MAX_PIXELS_PER_SIDE, MapConfig, ObjectConfig, OutputConfig,
};
pub use error::ConfigError;
