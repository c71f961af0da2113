//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level map configuration.
///
/// Built once at startup and passed by reference afterwards; nothing mutates
/// it during a render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Figure size and resolution.
    pub figure: FigureConfig,
    /// Where rendered images go.
    pub output: OutputConfig,
    /// Input data files.
    pub data: DataConfig,
    /// Graticule spacing.
    pub grid: GridConfig,
    /// Map center and title.
    pub map: MapConfig,
    /// Which layers to draw.
    pub layers: LayerConfig,
    /// Day/night sampling grid.
    pub illumination: IlluminationConfig,
    /// Extra labelled markers drawn on every frame.
    pub objects: Vec<ObjectConfig>,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Figure configuration. Pixel size is inches × dpi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FigureConfig {
    /// Figure width in inches.
    pub width_in: f32,
    /// Figure height in inches.
    pub height_in: f32,
    /// Dots per inch.
    pub dpi: u32,
}

/// Largest image side in pixels a figure may request.
pub const MAX_PIXELS_PER_SIDE: u32 = 8192;

impl FigureConfig {
    /// Output size in pixels, each side clamped to `1..=MAX_PIXELS_PER_SIDE`.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f32| {
            let pixels = (inches * self.dpi as f32).round();
            if pixels.is_nan() {
                return 1;
            }
            if pixels > MAX_PIXELS_PER_SIDE as f32 {
                log::warn!(
                    "Figure side of {pixels} px exceeds {MAX_PIXELS_PER_SIDE}, clamping"
                );
            }
            pixels.clamp(1.0, MAX_PIXELS_PER_SIDE as f32) as u32
        };
        (px(self.width_in), px(self.height_in))
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Static image path; the format follows the extension (png, jpg).
    pub file: PathBuf,
    /// Animated GIF path.
    pub animation_file: PathBuf,
    /// Delay between animation frames in milliseconds.
    pub frame_interval_ms: u32,
}

/// Input data configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Coastline text file (`lon,lat` per line, blank line between outlines).
    pub coastline_file: PathBuf,
    /// Cities CSV with `city`, `lat`, `lng` columns.
    pub cities_file: PathBuf,
}

/// Graticule configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Meridian spacing in degrees (0 disables meridians).
    pub lon_step: f64,
    /// Parallel spacing in degrees (0 disables parallels).
    pub lat_step: f64,
    /// Latitudes drawn as dashed highlight lines.
    pub special_latitudes: Vec<f64>,
}

/// Map center and title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude of the projection pole.
    pub center_lat: f64,
    /// Longitude of the projection pole.
    pub center_lon: f64,
    /// Map title.
    pub title: String,
}

/// Layer toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    pub coastlines: bool,
    pub cities: bool,
    pub sun: bool,
    pub moon: bool,
    /// Shade the sunlit hemisphere.
    pub daylight: bool,
}

/// Resolution of the day/night mask.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IlluminationConfig {
    /// Samples around the disk.
    pub theta_samples: usize,
    /// Samples from center to rim.
    pub radius_samples: usize,
}

/// A user-defined marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObjectConfig {
    /// Legend label; empty means no legend entry.
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    /// Marker code: `o`, `s`, `^`, `D`, `+`, `x` or `*`.
    pub marker: String,
    /// RGB color.
    pub color: (u8, u8, u8),
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 6.0,
            height_in: 6.0,
            dpi: 200,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("polar_map.png"),
            animation_file: PathBuf::from("polar_map.gif"),
            frame_interval_ms: 200,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            coastline_file: PathBuf::from("data/coastline.txt"),
            cities_file: PathBuf::from("data/worldcities.csv"),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            lon_step: 30.0,
            lat_step: 30.0,
            // Equator, tropics, polar circles.
            special_latitudes: vec![0.0, 23.5, -23.5, 66.5, -66.5],
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 90.0,
            center_lon: 0.0,
            title: "Polar map".to_string(),
        }
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            coastlines: true,
            cities: false,
            sun: true,
            moon: true,
            daylight: false,
        }
    }
}

impl Default for IlluminationConfig {
    fn default() -> Self {
        Self {
            theta_samples: 360,
            radius_samples: 180,
        }
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            lat: 0.0,
            lon: 0.0,
            marker: "o".to_string(),
            color: (255, 255, 255),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::load_file(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load config from an explicit RON file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
